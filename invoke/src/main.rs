//! Local invoker: feed a saved Lambda event through a demo app and print the
//! envelope the function would return.

use clap::Parser;
use lambdapi::api::*;
use serde_json::{json, Value};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lambdapi-invoke")]
#[command(about = "Dispatch a Lambda event through the demo router", long_about = None)]
struct Cli {
    /// Event payload file. Reads stdin when omitted.
    #[arg(short, long)]
    event: Option<PathBuf>,

    /// Event source, overrides the config file.
    #[arg(short, long, value_parser = EventSource::ALLOWED)]
    source: Option<String>,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the Swagger document instead of dispatching.
    #[arg(long)]
    swagger: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(source) = cli.source {
        config.source = source;
    }

    let app = demo_app(&config)?;

    if cli.swagger {
        println!("{}", serde_json::to_string_pretty(&app.swagger()?)?);
        return Ok(());
    }

    let raw = match &cli.event {
        Some(path) => std::fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };
    let event = parse_event(&raw)?;
    log::debug!("dispatching {} byte event as {}", raw.len(), app.source());

    println!("{}", serde_json::to_string_pretty(&app.process_request(&event))?);
    Ok(())
}

fn demo_app(config: &AppConfig) -> Result<App, RouterError> {
    let mut app = App::from_config(config)?;

    app.route("/hello")?.register_handler(
        HttpMethod::GET,
        MethodHandler::new(|req: Request| {
            let name = req.param_str("name").unwrap_or("world").to_string();
            Response::json(200, json!({"message": format!("Hello, {}!", name)}))
        })
        .with_schema(
            OperationSchema::new()
                .summary("Greet the caller")
                .parameter(ParameterSchema::query("name", "string").optional()),
        ),
    );

    let users = app.route("/users/{id}")?;
    users.register_handler(
        HttpMethod::GET,
        MethodHandler::new(|req: Request| {
            json!({
                "statusCode": 200,
                "body": {"id": req.param("id"), "token": req.attribute("token")}
            })
        })
        .with_schema(
            OperationSchema::new()
                .summary("Fetch a user")
                .parameter(ParameterSchema::header("Authorization"))
                .returns("User"),
        ),
    );
    users.use_middleware(HttpMethod::GET, BearerTokenDecoder::new())?;
    users.use_middleware(
        HttpMethod::GET,
        AuthCheck::new(|req: &Request| req.attribute("token").is_some()),
    )?;

    app.route("/echo")?.register(HttpMethod::POST, |req: Request| -> Result<Response, RouterError> {
        match req.body {
            RequestBody::Binary(bytes) => Ok(Response::new(200, ResponseBody::Binary(bytes))),
            RequestBody::Text(text) => Ok(Response::text(200, text)),
            RequestBody::Empty => Err(RouterError::handler("nothing to echo")),
            _ => Ok(Response::json(200, Value::Object(req.params))),
        }
    });

    Ok(app)
}
