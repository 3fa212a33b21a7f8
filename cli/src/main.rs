mod seed;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use cocina_core::{
    category_label, ApiClient, CatalogView, CategoryDetailView, ClientConfig, Destination,
    FormAction, GetRecipesUseCase, HttpStore, LoginView, ManagementSurface, Navigator, Notice,
    ProfileView, RecipeCard, RecipeCardsView, RecipeRepository, ServerIdentity, Session,
    SessionRouter, SignInProvider, Tab, ViewState,
};
use reqwest::Method;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "cocina")]
#[command(about = "Cocina recipe catalog CLI", long_about = None)]
struct Cli {
    #[command(flatten)]
    conn: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConnectionArgs {
    /// Server URL (default: COCINA_SERVER_URL or http://localhost:3000)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Bearer token from `cocina sign-in` (default: COCINA_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ping the server (unauthenticated)
    Ping,
    /// Sign in with a Google ID token or Facebook access token
    SignIn {
        /// Identity provider: google or facebook
        provider: SignInProvider,
        /// Credential issued by the provider
        credential: String,
    },
    /// End the current session
    SignOut,
    /// Show the profile of the signed-in user
    Whoami,
    /// List recipe categories
    Categories {
        /// Ask the server for the distinct categories
        #[arg(long)]
        server_filter: bool,
    },
    /// Show the recipes of one category
    Category {
        /// Category name (exact match)
        name: Option<String>,
        /// Filter on the server instead of fetching everything
        #[arg(long)]
        server_filter: bool,
    },
    /// Show every recipe as a detail card
    Cards,
    /// Create a recipe
    Create {
        #[arg(long)]
        name: String,
        /// Repeat once per ingredient
        #[arg(long = "ingredient", required = true)]
        ingredients: Vec<String>,
        #[arg(long)]
        instructions: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Update name, ingredients and instructions of a recipe
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        /// Replaces the whole ingredient list; repeat once per ingredient
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,
        #[arg(long)]
        instructions: Option<String>,
    },
    /// Delete a recipe
    Delete { id: String },
    /// Populate the store with sample recipes
    Seed,
}

/// Prints each screen transition.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&mut self, destination: Destination) {
        eprintln!("-> {}", destination.path());
    }
}

struct Client {
    api: ApiClient,
    repository: RecipeRepository,
}

impl Client {
    fn connect(args: &ConnectionArgs) -> Result<Self> {
        let mut config = ClientConfig::from_env().context("Invalid client configuration")?;
        if let Some(server) = &args.server {
            config.server_url = ClientConfig::new(server)
                .with_context(|| format!("Invalid server URL {}", server))?
                .server_url;
        }
        let config = config.with_token(args.token.clone());

        let api = ApiClient::new(&config).context("Failed to build HTTP client")?;
        let repository = RecipeRepository::new(Arc::new(HttpStore::new(api.clone())));
        Ok(Self { api, repository })
    }

    fn session(&self) -> Session {
        Session::new(Box::new(ServerIdentity::new(self.api.clone())))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = Client::connect(&cli.conn)?;

    match cli.command {
        Commands::Ping => ping(&client).await?,
        Commands::SignIn {
            provider,
            credential,
        } => sign_in(&client, provider, &credential).await?,
        Commands::SignOut => sign_out(&client).await?,
        Commands::Whoami => whoami(&client).await?,
        Commands::Categories { server_filter } => categories(&client, server_filter).await?,
        Commands::Category {
            name,
            server_filter,
        } => category(&client, name.as_deref(), server_filter).await?,
        Commands::Cards => cards(&client).await?,
        Commands::Create {
            name,
            ingredients,
            instructions,
            category,
            image_url,
        } => {
            let mut surface = ManagementSurface::new(client.repository.clone());
            let form = surface.form_mut();
            form.name = name;
            form.instructions = instructions;
            form.category = category;
            form.image_url = image_url.unwrap_or_default();
            for (i, ingredient) in ingredients.into_iter().enumerate() {
                form.add_ingredient();
                form.set_ingredient(i, ingredient);
            }
            run_action(&mut surface, FormAction::Create).await?;
        }
        Commands::Update {
            id,
            name,
            ingredients,
            instructions,
        } => {
            let mut surface = editing(&client, &id).await?;
            let form = surface.form_mut();
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(instructions) = instructions {
                form.instructions = instructions;
            }
            if !ingredients.is_empty() {
                while form.remove_ingredient(0).is_some() {}
                for (i, ingredient) in ingredients.into_iter().enumerate() {
                    form.add_ingredient();
                    form.set_ingredient(i, ingredient);
                }
            }
            run_action(&mut surface, FormAction::Update).await?;
        }
        Commands::Delete { id } => {
            let mut surface = editing(&client, &id).await?;
            run_action(&mut surface, FormAction::Delete).await?;
        }
        Commands::Seed => seed::seed(&client.repository).await?,
    }

    Ok(())
}

#[derive(Deserialize)]
struct PingResponse {
    message: String,
}

async fn ping(client: &Client) -> Result<()> {
    let url = client.api.endpoint(&["api", "test", "unauthed-ping"]);
    let response: PingResponse = client
        .api
        .request(Method::GET, url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    println!("{}", response.message);

    Ok(())
}

async fn sign_in(client: &Client, provider: SignInProvider, credential: &str) -> Result<()> {
    let session = client.session();
    let mut login = LoginView::new();

    let user = login
        .sign_in(&session, provider, credential, &mut TerminalNavigator)
        .await
        .context("Sign-in failed")?;

    print_profile(&ProfileView::new(Some(&user)));
    if let Some(token) = client.api.token() {
        println!();
        println!("export COCINA_TOKEN={}", token);
    }

    Ok(())
}

async fn sign_out(client: &Client) -> Result<()> {
    let session = client.session();
    session.restore().await.context("Failed to restore session")?;

    let mut profile = ProfileView::new(session.current().as_ref());
    if profile.log_out(&session, &mut TerminalNavigator).await.is_err() {
        bail!("{}", profile.error().unwrap_or("Sign-out failed"));
    }

    println!("Signed out");
    Ok(())
}

async fn whoami(client: &Client) -> Result<()> {
    let session = client.session();
    let mut router = SessionRouter::new(session.subscribe());

    let user = session.restore().await.context("Failed to restore session")?;
    router.route_now(&mut TerminalNavigator);

    match user {
        Some(user) => {
            print_profile(&ProfileView::new(Some(&user)));
            let tabs: Vec<String> = Tab::ALL
                .iter()
                .map(|tab| format!("{} ({})", tab.title(), tab.destination().path()))
                .collect();
            println!("Tabs:   {}", tabs.join(", "));
        }
        None => println!("Not signed in"),
    }

    Ok(())
}

fn print_profile(profile: &ProfileView) {
    println!("Name:   {}", profile.display_name);
    println!("Email:  {}", profile.email);
    println!("Avatar: {}", profile.avatar);
}

async fn categories(client: &Client, server_filter: bool) -> Result<()> {
    let mut view = CatalogView::new();
    if server_filter {
        view.load_distinct(&client.repository).await;
    } else {
        view.load(&client.repository).await;
    }

    match view.state() {
        ViewState::Ready(categories) if categories.is_empty() => println!("No categories yet"),
        ViewState::Ready(categories) => {
            for (i, category) in categories.iter().enumerate() {
                println!("{:>3}. {}", i + 1, category_label(category));
            }
        }
        ViewState::Failed(message) => bail!("Failed to load categories: {}", message),
        ViewState::Loading => {}
    }

    Ok(())
}

async fn category(client: &Client, name: Option<&str>, server_filter: bool) -> Result<()> {
    let mut view = CategoryDetailView::new(name);
    if server_filter {
        view.load_filtered(&client.repository).await;
    } else {
        view.load(&client.repository).await;
    }

    println!("# {}", view.category());
    print_cards(view.state())
}

async fn cards(client: &Client) -> Result<()> {
    let use_case = GetRecipesUseCase::new(client.repository.clone());
    let mut view = RecipeCardsView::new();
    view.load(&use_case).await;

    print_cards(view.state())
}

fn print_cards(state: &ViewState<Vec<RecipeCard>>) -> Result<()> {
    match state {
        ViewState::Ready(cards) if cards.is_empty() => println!("No recipes"),
        ViewState::Ready(cards) => {
            for card in cards {
                println!();
                println!("{} [{}]", card.name, card.id);
                println!("  Imagen:       {}", card.image_url);
                println!("  Categoría:    {}", category_label(&card.category));
                println!(
                    "  Ingredientes: {} ({})",
                    card.ingredients, card.ingredient_count
                );
                println!("  {}", card.preview);
            }
        }
        ViewState::Failed(message) => bail!("Failed to load recipes: {}", message),
        ViewState::Loading => {}
    }

    Ok(())
}

/// A management surface with `id` selected for editing.
async fn editing(client: &Client, id: &str) -> Result<ManagementSurface> {
    let mut surface = ManagementSurface::new(client.repository.clone());
    surface.refresh().await.context("Failed to load recipes")?;
    surface.select(id)?;
    Ok(surface)
}

async fn run_action(surface: &mut ManagementSurface, action: FormAction) -> Result<()> {
    let result = surface.submit(action).await;

    match surface.notice() {
        Some(Notice::Info(message)) => println!("{}", message),
        Some(Notice::Warning(message)) => eprintln!("warning: {}", message),
        Some(Notice::Error(message)) => eprintln!("{}", message),
        None => {}
    }

    result.with_context(|| format!("{:?} failed", action))
}
