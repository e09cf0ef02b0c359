use std::{io::Write, process, sync::Arc};

use serde_json::json;
use stockroom::{
    application::{
        dashboard::{DashboardRuntime, Debouncer},
        error::AppError,
    },
    cache::{CacheConfig, QueryCache},
    config::{self, DeleteArgs, ListArgs, OutputArgs, ProductFieldArgs, UpdateArgs},
    domain::{
        draft::ProductDraft,
        listing::{ALL_CATEGORIES, ListingQuery},
        products::ProductId,
    },
    infra::{catalog::CatalogClient, error::InfraError, telemetry},
    presentation::{
        terminal::{TerminalFrontend, forward_commands},
        views::{
            render_template,
            reports::{
                CategoriesReportTemplate, ListingReport, ListingReportTemplate,
                ProductDetailTemplate, ProductDetailView,
            },
            table::TableTemplate,
        },
    },
};
use tokio::{io::BufReader, sync::mpsc};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

const INTENT_BUFFER: usize = 32;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    let report = error.report();
    if dispatcher::has_been_set() {
        error!(error = %error, chain = %report.joined(), "{}", error.presentation_message());
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, chain = %report.joined(), "{}", error.presentation_message());
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    telemetry::init(&settings.logging)?;

    let command = cli_args.command.unwrap_or(config::Command::Dashboard);

    let client = CatalogClient::new(&settings.catalog)?;
    info!(
        target: "stockroom::main",
        base_url = %client.base_url(),
        "catalog client ready"
    );
    let cache = Arc::new(QueryCache::new(
        CacheConfig::from(&settings.cache),
        Arc::new(client),
    ));

    match command {
        config::Command::Dashboard => run_dashboard(&settings, cache).await,
        config::Command::List(args) => run_list(&cache, args).await,
        config::Command::Categories(args) => run_categories(&cache, args).await,
        config::Command::Add(args) => run_add(&cache, args).await,
        config::Command::Update(args) => run_update(&cache, args).await,
        config::Command::Delete(args) => run_delete(&cache, args).await,
    }
}

async fn run_dashboard(
    settings: &config::Settings,
    cache: Arc<QueryCache>,
) -> Result<(), AppError> {
    let (intents_tx, intents_rx) = mpsc::channel(INTENT_BUFFER);
    let reader = tokio::spawn(forward_commands(
        BufReader::new(tokio::io::stdin()),
        intents_tx,
        std::io::stderr(),
    ));

    let runtime = DashboardRuntime::new(
        cache,
        Debouncer::new(settings.dashboard.search_debounce),
        TerminalFrontend::new(std::io::stdout()),
    );
    let result = runtime.run(intents_rx).await;

    // Aborting a reader that already stopped leaves its own result in place.
    reader.abort();
    match reader.await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            warn!(target: "stockroom::main", error = %err, "reading commands failed");
            result?;
            return Err(err.into());
        }
        Err(err) if err.is_cancelled() => {}
        Err(err) => warn!(target: "stockroom::main", error = %err, "command reader panicked"),
    }
    result.map(|_| ())
}

async fn run_list(cache: &QueryCache, args: ListArgs) -> Result<(), AppError> {
    let query = ListingQuery::new(
        args.page,
        args.search.as_deref().unwrap_or_default(),
        args.category.as_deref().unwrap_or(ALL_CATEGORIES),
    );
    let result = cache.listing(&query).await?;

    if args.output.json {
        return emit_json(&json!({
            "products": result.products,
            "total": result.total,
            "skip": result.skip,
            "limit": result.limit,
            "page": query.page,
            "totalPages": result.total_pages(query.page_size),
        }));
    }

    let report = ListingReport::new(&query, &result);
    let table = render_template(&TableTemplate {
        view: &report.table,
    })?;
    emit(&render_template(&ListingReportTemplate {
        table,
        view: &report,
    })?)
}

async fn run_categories(cache: &QueryCache, args: OutputArgs) -> Result<(), AppError> {
    let categories = cache.categories().await?;

    if args.json {
        let entries: Vec<_> = categories
            .iter()
            .map(|category| json!({ "slug": category.slug, "name": category.name }))
            .collect();
        return emit_json(&json!(entries));
    }

    emit(&render_template(&CategoriesReportTemplate::new(&categories))?)
}

fn draft_from(args: &ProductFieldArgs) -> ProductDraft {
    ProductDraft {
        title: args.title.clone(),
        price: args.price.clone(),
        stock: args.stock.clone(),
        category: args.category.clone(),
        description: args.description.clone(),
    }
}

async fn run_add(cache: &QueryCache, args: ProductFieldArgs) -> Result<(), AppError> {
    let submission = draft_from(&args).submit(None)?;
    let product = cache.create_product(&submission.fields).await?;

    if args.output.json {
        return emit_json(&json!(product));
    }
    emit(&render_template(&ProductDetailTemplate {
        view: &ProductDetailView::new("Product created", &product),
    })?)
}

async fn run_update(cache: &QueryCache, args: UpdateArgs) -> Result<(), AppError> {
    let id = ProductId::new(args.id);
    let submission = draft_from(&args.fields).submit(Some(id))?;
    let product = cache.update_product(id, &submission.fields).await?;

    if args.fields.output.json {
        return emit_json(&json!(product));
    }
    emit(&render_template(&ProductDetailTemplate {
        view: &ProductDetailView::new("Product updated", &product),
    })?)
}

async fn run_delete(cache: &QueryCache, args: DeleteArgs) -> Result<(), AppError> {
    if !args.yes {
        return Err(AppError::ConfirmationRequired { id: args.id });
    }

    let deleted = cache.delete_product(ProductId::new(args.id)).await?;
    emit(&render_template(&ProductDetailTemplate {
        view: &ProductDetailView::deleted(&deleted),
    })?)
}

fn emit(text: &str) -> Result<(), AppError> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", text.trim_end()).map_err(InfraError::from)?;
    Ok(())
}

fn emit_json(value: &serde_json::Value) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::unexpected(format!("failed to encode output: {err}")))?;
    emit(&text)
}
