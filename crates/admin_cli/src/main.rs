use std::{error::Error, io::Write};

use clap::{Args, Parser, Subcommand};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal,
    terminal::ClearType,
};
use engine::{CatalogStore, RecordCategory, RecordSubcategory, SeaStore};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection, EntityTrait, Set};

mod users {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub username: String,
        pub password: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

#[derive(Parser, Debug)]
#[command(name = "budget_tracker_admin")]
#[command(about = "Admin utilities for the budget tracker (users and category catalog)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./budget_tracker.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
    Category(Category),
    Subcategory(Subcategory),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create(UserCreateArgs),
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    username: String,
}

#[derive(Args, Debug)]
struct Category {
    #[command(subcommand)]
    command: CategoryCommand,
}

#[derive(Subcommand, Debug)]
enum CategoryCommand {
    Create(CategoryCreateArgs),
    /// Print every category with its subcategories.
    List,
}

#[derive(Args, Debug)]
struct CategoryCreateArgs {
    #[arg(long)]
    id: i32,
    #[arg(long)]
    name: String,
}

#[derive(Args, Debug)]
struct Subcategory {
    #[command(subcommand)]
    command: SubcategoryCommand,
}

#[derive(Subcommand, Debug)]
enum SubcategoryCommand {
    Create(SubcategoryCreateArgs),
}

#[derive(Args, Debug)]
struct SubcategoryCreateArgs {
    #[arg(long)]
    id: i32,
    #[arg(long)]
    category: i32,
    #[arg(long)]
    name: String,
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self, Box<dyn Error + Send + Sync>> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn prompt_password(prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    let _raw = RawModeGuard::enter()?;

    let mut out = std::io::stderr();
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(prompt)
    )?;
    out.flush()?;

    let mut buf = String::new();
    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };

        match code {
            KeyCode::Enter => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                break;
            }
            KeyCode::Backspace => {
                if buf.pop().is_some() {
                    execute!(out, cursor::MoveLeft(1), Print(" "), cursor::MoveLeft(1))?;
                    out.flush()?;
                }
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                return Err("interrupted".into());
            }
            KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::CONTROL) => {
                buf.push(ch);
                execute!(out, Print("*"))?;
                out.flush()?;
            }
            _ => {}
        }
    }

    Ok(buf)
}

fn prompt_password_twice() -> Result<String, Box<dyn Error + Send + Sync>> {
    let mut out = std::io::stderr();
    for _ in 0..3 {
        let first = prompt_password("Password: ")?;
        if first.is_empty() {
            execute!(
                out,
                cursor::MoveToColumn(0),
                terminal::Clear(ClearType::CurrentLine),
                Print("Password must not be empty.\r\n")
            )?;
            continue;
        }

        if first == prompt_password("Confirm password: ")? {
            return Ok(first);
        }

        execute!(
            out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine),
            Print("Passwords do not match. Try again.\r\n")
        )?;
    }

    Err("too many attempts".into())
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

async fn create_user(
    db: &DatabaseConnection,
    args: UserCreateArgs,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let username = args.username.trim().to_string();
    if username.is_empty() {
        eprintln!("username must not be empty");
        std::process::exit(2);
    }

    if users::Entity::find_by_id(username.clone())
        .one(db)
        .await?
        .is_some()
    {
        eprintln!("user already exists: {username}");
        std::process::exit(1);
    }

    let password = prompt_password_twice()?;
    let user = users::ActiveModel {
        username: Set(username.clone()),
        password: Set(password),
    };
    users::Entity::insert(user).exec(db).await?;

    println!("created user: {username}");
    Ok(())
}

async fn list_categories(store: &SeaStore) -> Result<(), Box<dyn Error + Send + Sync>> {
    for category in store.all_categories().await? {
        println!("{:>3}  {}", category.id(), category.name());
        for sub in category.subcategories() {
            println!("     {:>3}  {}", sub.id(), sub.name());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let store = SeaStore::new(db.clone());

    match cli.command {
        Command::User(User {
            command: UserCommand::Create(args),
        }) => create_user(&db, args).await?,
        Command::Category(Category {
            command: CategoryCommand::Create(args),
        }) => {
            let category = RecordCategory::new(args.id, &args.name)?;
            store.insert_category(&category).await?;
            println!("created category: {} ({})", category.name(), category.id());
        }
        Command::Category(Category {
            command: CategoryCommand::List,
        }) => list_categories(&store).await?,
        Command::Subcategory(Subcategory {
            command: SubcategoryCommand::Create(args),
        }) => {
            let subcategory = RecordSubcategory::new(args.id, args.category, &args.name)?;
            if let Err(err) = store.insert_subcategory(&subcategory).await {
                eprintln!("{err}");
                std::process::exit(1);
            }
            println!(
                "created subcategory: {} ({}) under category {}",
                subcategory.name(),
                subcategory.id(),
                subcategory.category_id()
            );
        }
    }

    Ok(())
}
