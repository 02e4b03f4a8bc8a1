use std::{path::PathBuf, process, sync::Arc};

use actix_web::{
    middleware::{self, Condition},
    web::Data,
    App, HttpServer,
};
use anyhow::Context;
use certificate::{
    render::{
        options::{Layout, RenderOptions},
        renderer::CertificateRenderer,
    },
    roster::roster::Roster,
    service::service::CertificateService,
};
use clap::Parser;

mod error;
mod page;
mod routes;

/// 🎓 Certificate server, issues PNG certificates to students listed in the roster
#[derive(Parser, Debug)]
struct Cli {
    /// CSV roster with `name`, `email` and optionally `course` columns
    #[clap(short, long, default_value = "student.csv")]
    roster: PathBuf,

    /// Background image the text is drawn onto
    #[clap(short, long, default_value = "Certificate_template.jpg")]
    template: PathBuf,

    /// Certificate layout: name-only or name-and-course
    #[clap(short, long, default_value = "name-only")]
    layout: Layout,

    /// JSON file overriding individual render options of the chosen layout
    #[clap(long)]
    render_options: Option<PathBuf>,

    /// Decode the template once at startup instead of reading it for every request
    #[clap(long)]
    cache_template: bool,

    /// Port the server will run on
    #[clap(short, long, default_value = "5000")]
    port: u16,

    /// Address the server will run on
    #[clap(short, long, default_value = "127.0.0.1")]
    address: String,

    /// Log every HTTP request
    #[clap(long)]
    log_http: bool,

    /// Number of HTTP worker threads
    #[clap(long, default_value_t = 2)]
    http_workers: usize,
}

fn load_service(args: &Cli) -> anyhow::Result<CertificateService> {
    let options = match &args.render_options {
        Some(path) => RenderOptions::from_json_file(path, args.layout)?,
        None => RenderOptions::for_layout(args.layout),
    };

    options.validate()?;

    log::info!("Rendering with the {} layout", options.layout);

    let roster = Roster::load(&args.roster)
        .with_context(|| format!("Unable to load roster {}", args.roster.display()))?;

    let renderer = CertificateRenderer::new(args.template.clone(), options);

    let renderer = if args.cache_template {
        renderer.with_cached_template()?
    } else {
        renderer
    };

    // An unreadable template must fail startup, not the first request
    let (width, height) = renderer.validate_template()?;

    log::info!(
        "Using template {} ({}x{}, cached: {})",
        args.template.display(),
        width,
        height,
        renderer.is_cached()
    );

    Ok(CertificateService::new(Arc::new(roster), renderer))
}

async fn run(args: Cli) -> anyhow::Result<()> {
    let service = Data::new(load_service(&args)?);

    log::info!("starting HTTP server on {}:{}", args.address, args.port);

    let log_http = args.log_http;

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .configure(routes::configure)
            .wrap(Condition::new(log_http, middleware::Logger::default()))
    })
    .workers(args.http_workers)
    .bind((args.address, args.port))?
    .run()
    .await?;

    Ok(())
}

#[actix_web::main]
async fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Cli::parse();

    if let Err(e) = run(args).await {
        log::error!("Certificate server failed: {:#}", e);
        process::exit(1);
    }
}
