use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use rust_decimal::Decimal;

use whizzyverse::{
    app::App,
    cli, config, error, logging,
    management::DEFAULT_SIZE,
    store::{FileStorage, MemoryStorage, Storage},
    types::Product,
    utils,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Keep everything in memory for this run; nothing is read or written on disk
    #[clap(long, global = true)]
    ephemeral: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Handle the shopping cart
    Cart(CartOptions),

    /// Handle favorites
    Favorites(FavoritesOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Handle the shopping cart")]
pub struct CartOptions {
    /// Subcommands under `cart` (e.g., `add`); lists the cart when omitted
    #[command(subcommand)]
    pub command: Option<CartSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CartSubcommand {
    /// Add a product, merging with an entry of the same id and size
    Add(CartAddOpts),

    /// Remove an entry
    Remove(CartKeyOpts),

    /// Set the quantity of an entry; 0 or less removes it
    Update(CartUpdateOpts),

    /// Remove every entry
    Clear,
}

#[derive(Parser, Debug, Clone)]
pub struct CartAddOpts {
    #[clap(long)]
    pub id: i64,

    #[clap(long)]
    pub name: String,

    /// Unit price, e.g. 19.99
    #[clap(long, value_parser = utils::parse_price)]
    pub price: Decimal,

    #[clap(long, default_value = DEFAULT_SIZE, value_parser = utils::parse_size)]
    pub size: String,

    #[clap(long, default_value_t = 1)]
    pub quantity: u32,

    #[clap(long)]
    pub image_url: Option<String>,

    #[clap(long)]
    pub category: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CartKeyOpts {
    #[clap(long)]
    pub id: i64,

    #[clap(long, default_value = DEFAULT_SIZE, value_parser = utils::parse_size)]
    pub size: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CartUpdateOpts {
    #[clap(long)]
    pub id: i64,

    #[clap(long, default_value = DEFAULT_SIZE, value_parser = utils::parse_size)]
    pub size: String,

    #[clap(long, allow_negative_numbers = true)]
    pub quantity: i64,
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Handle favorites",
    args_conflicts_with_subcommands = true // disallow mixing listing flags with `toggle`
)]
pub struct FavoritesOptions {
    /// Only list this bucket
    #[clap(long, value_parser = utils::parse_bucket)]
    pub bucket: Option<String>,

    /// Resolve favorite ids to full records through the site API
    #[clap(long)]
    pub resolve: bool,

    /// Subcommands under `favorites` (e.g., `toggle`)
    #[command(subcommand)]
    pub command: Option<FavoritesSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum FavoritesSubcommand {
    /// Add the id to the bucket, or remove it if already there
    Toggle(FavoritesToggleOpts),

    /// Empty every bucket
    Clear,
}

#[derive(Parser, Debug, Clone)]
pub struct FavoritesToggleOpts {
    #[clap(value_parser = utils::parse_bucket)]
    pub bucket: String,

    pub id: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }
    logging::init();

    let cli = Cli::parse();

    if cli.ephemeral {
        run(MemoryStorage::new(), cli.command).await;
    } else {
        run(FileStorage::from_env(), cli.command).await;
    }
}

async fn run<S: Storage + Clone>(storage: S, command: Command) {
    if let Command::Completions(opt) = command {
        let mut cmd = Cli::command_for_update();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let mut app = App::bootstrap(storage).await;
    let _badges = cli::attach_badges(&app);

    match command {
        Command::Cart(opt) => match opt.command {
            Some(CartSubcommand::Add(a)) => {
                let product = Product {
                    id: a.id,
                    name: a.name,
                    price: a.price,
                    image_url: a.image_url,
                    category: a.category,
                };
                cli::add_to_cart(&mut app.cart, product, a.quantity, &a.size).await
            }
            Some(CartSubcommand::Remove(k)) => {
                cli::remove_from_cart(&mut app.cart, k.id, &k.size).await
            }
            Some(CartSubcommand::Update(u)) => {
                cli::update_cart_quantity(&mut app.cart, u.id, &u.size, u.quantity).await
            }
            Some(CartSubcommand::Clear) => cli::clear_cart(&mut app.cart).await,
            None => cli::list_cart(&app.cart),
        },

        Command::Favorites(opt) => match opt.command {
            Some(FavoritesSubcommand::Toggle(t)) => {
                cli::toggle_favorite(&mut app.favorites, &t.bucket, t.id).await
            }
            Some(FavoritesSubcommand::Clear) => cli::clear_favorites(&mut app.favorites).await,
            None => {
                if let Err(e) = cli::list_favorites(&app.favorites, opt.bucket, opt.resolve).await {
                    error!("{}", e);
                }
            }
        },

        Command::Completions(_) => {}
    }
}
