use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use crate::domain::environment::{Platform, RuntimeEnv};
use crate::domain::report::{Attachment, Category, ReportDraft, SignupForm};
use crate::interface_adapters::api::ApiClient;

#[derive(Parser)]
#[command(
    name = "report_client",
    about = "Client for the civic issue reporting backend"
)]
struct Cli {
    /// Explicit backend base URL; disables endpoint discovery.
    #[arg(long, env = "REPORT_API_URL", global = true)]
    api_url: Option<String>,

    /// Client platform tag used for endpoint discovery (android or ios).
    #[arg(long, env = "REPORT_PLATFORM", default_value = "android", global = true)]
    platform: String,

    /// Development connection string ("host:port") advertised by dev tooling.
    #[arg(long, env = "REPORT_DEV_HOST", global = true)]
    dev_host: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Browse and submit community reports.
    Reports {
        #[command(subcommand)]
        action: ReportsAction,
    },
    /// Create an account and print the session token.
    Signup(SignupArgs),
    /// Log in and print the session token.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Ask the backend to create its demo reports.
    Seed,
    /// Print the candidate base URLs in resolution order.
    Candidates,
}

#[derive(Subcommand)]
enum ReportsAction {
    /// List a page of community reports.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one report.
    Show { id: u64 },
    /// Submit a new report.
    Submit(SubmitArgs),
}

#[derive(Args)]
struct SubmitArgs {
    /// Reporter name attached to the report.
    #[arg(long, default_value = "guest")]
    name: String,
    /// Issue category: pothole, garbage, or streetlight.
    #[arg(long)]
    category: String,
    /// Description of the issue.
    #[arg(long, default_value = "")]
    description: String,
    /// Human-readable address.
    #[arg(long, default_value = "")]
    location: String,
    #[arg(long)]
    lat: Option<f64>,
    #[arg(long)]
    lng: Option<f64>,
    /// Photo to upload with the report.
    #[arg(long)]
    photo: Option<PathBuf>,
    /// Voice note to upload with the report.
    #[arg(long)]
    voice: Option<PathBuf>,
}

#[derive(Args)]
struct SignupArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    confirm_password: String,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    lat: Option<f64>,
    #[arg(long)]
    lng: Option<f64>,
    /// Profile picture to upload.
    #[arg(long)]
    avatar: Option<PathBuf>,
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    let Some(platform) = Platform::parse(&cli.platform) else {
        tracing::error!(tag = %cli.platform, "unknown platform tag");
        eprintln!("unknown platform tag: {}", cli.platform);
        return ExitCode::FAILURE;
    };

    let env = RuntimeEnv {
        api_url_override: cli.api_url.clone(),
        platform,
        dev_host: cli.dev_host.clone(),
    };
    let client = ApiClient::new(env);

    match dispatch(&client, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(client: &ApiClient, command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Candidates => {
            for base in client.candidates() {
                println!("{base}");
            }
        }
        Command::Reports { action } => dispatch_reports(client, action).await?,
        Command::Signup(args) => {
            let form = signup_form(args)?;
            let (base, session) = client.signup(&form).await?;
            tracing::info!(%base, "account created");
            println!("token: {}", session.token);
        }
        Command::Login { username, password } => {
            let (base, session) = client.login(&username, &password).await?;
            tracing::info!(%base, "logged in");
            println!("token: {}", session.token);
        }
        Command::Seed => {
            let (base, detail) = client.seed_reports().await?;
            tracing::info!(%base, "seed requested");
            println!("{detail}");
        }
    }
    Ok(())
}

async fn dispatch_reports(
    client: &ApiClient,
    action: ReportsAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ReportsAction::List { page } => {
            let (base, listing) = client.list_reports(page).await?;
            tracing::info!(%base, count = listing.count, "reports fetched");
            println!("{} report(s) total", listing.count);
            for report in &listing.results {
                println!(
                    "#{} {} ({}) {}",
                    report.id, report.title, report.name, report.location
                );
            }
            if listing.next.is_some() {
                println!("more on page {}", page + 1);
            }
        }
        ReportsAction::Show { id } => {
            let (base, report) = client.get_report(id).await?;
            tracing::info!(%base, id = report.id, "report fetched");
            println!("#{} {} by {}", report.id, report.title, report.name);
            if !report.location.is_empty() {
                println!("location: {}", report.location);
            }
            if !report.body.is_empty() {
                println!("{}", report.body);
            }
            println!(
                "comments: {}  likes: {}  shares: {}",
                report.comments, report.likes, report.shares
            );
        }
        ReportsAction::Submit(args) => {
            let draft = report_draft(args)?;
            let (base, report) = client.submit_report(&draft).await?;
            tracing::info!(%base, id = report.id, "report submitted");
            println!("submitted report #{}", report.id);
        }
    }
    Ok(())
}

fn report_draft(args: SubmitArgs) -> Result<ReportDraft, Box<dyn std::error::Error>> {
    let Some(category) = Category::parse(&args.category) else {
        return Err(format!("unknown category: {}", args.category).into());
    };
    let coords = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => Some((lat, lng)),
        _ => None,
    };
    Ok(ReportDraft {
        name: args.name,
        category,
        description: args.description,
        location: args.location,
        coords,
        photo: args.photo.as_deref().map(load_attachment).transpose()?,
        voice: args.voice.as_deref().map(load_attachment).transpose()?,
    })
}

fn signup_form(args: SignupArgs) -> Result<SignupForm, Box<dyn std::error::Error>> {
    let coords = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => Some((lat, lng)),
        _ => None,
    };
    Ok(SignupForm {
        first_name: args.first_name,
        last_name: args.last_name,
        username: args.username,
        email: args.email,
        phone_number: args.phone,
        password: args.password,
        confirm_password: args.confirm_password,
        coords,
        avatar: args.avatar.as_deref().map(load_attachment).transpose()?,
    })
}

fn load_attachment(path: &Path) -> Result<Attachment, Box<dyn std::error::Error>> {
    let bytes = std::fs::read(path)
        .map_err(|err| format!("cannot read {}: {err}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("attachment")
        .to_string();
    Ok(Attachment {
        content_type: content_type_for(&file_name).to_string(),
        file_name,
        bytes,
    })
}

fn content_type_for(file_name: &str) -> &'static str {
    match file_name.rsplit('.').next().map(str::to_ascii_lowercase) {
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "m4a" => "audio/m4a",
        Some(ext) if ext == "mp3" => "audio/mpeg",
        Some(ext) if ext == "wav" => "audio/wav",
        _ => "application/octet-stream",
    }
}
