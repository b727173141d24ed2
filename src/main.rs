use chrono::Local;
use clap::Parser;
use quote_desk::adapters::archive::build_archive;
use quote_desk::config::cli::{parse_date_arg, parse_status_arg, Command, CreateArgs, UpdateArgs};
use quote_desk::core::format::{format_brl, format_date_br};
use quote_desk::core::{QuoteStore, Storage};
use quote_desk::utils::error::ErrorSeverity;
use quote_desk::utils::{logger, validation::Validate};
use quote_desk::{
    AppConfig, CliConfig, CsvQuoteStore, ItemsPipeline, JsonQuoteStore, LocalStorage,
    QuoteEngine, QuoteForm, QuoteId, QuoteService, StoreBackend,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI arguments: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!(
            "Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: CliConfig) -> quote_desk::Result<()> {
    let config = cli.load_app_config()?;
    config.validate()?;
    tracing::debug!("Configuration: {:?}", config);

    let storage = LocalStorage::new(config.storage.data_dir.clone());
    match config.storage.backend {
        StoreBackend::Json => {
            let service = QuoteService::new(JsonQuoteStore::new(storage), config);
            execute(&service, cli.command).await
        }
        StoreBackend::Csv => {
            let service = QuoteService::new(CsvQuoteStore::new(storage), config);
            execute(&service, cli.command).await
        }
    }
}

async fn execute<R: QuoteStore>(
    service: &QuoteService<R, AppConfig>,
    command: Command,
) -> quote_desk::Result<()> {
    match command {
        Command::Normalize { input, output } => {
            let pipeline = ItemsPipeline::new(
                LocalStorage::new("."),
                LocalStorage::new(output.clone()),
                input,
                output,
            );
            let output_path = QuoteEngine::new(pipeline).run().await?;
            println!("📁 {}", output_path);
        }
        Command::NextId { date } => {
            let date = match date {
                Some(text) => parse_date_arg(&text)?,
                None => Local::now().date_naive(),
            };
            let id = service.preview_next_id(date).await?;
            println!("{} ({})", id, id.display_form());
        }
        Command::Create(args) => {
            let form = create_form(&args).await?;
            let quote = service.create(&form).await?;
            println!("✅ Saved quote {} ({})", quote.id, quote.id.display_form());
        }
        Command::Update(args) => {
            let id = QuoteId::from(args.id.as_str());
            let form = update_form(service, &id, &args).await?;
            let quote = service.update(&id, &form).await?;
            println!("✅ Updated quote {}", quote.id);
        }
        Command::Delete { id } => {
            let id = QuoteId::from(id);
            service.delete(&id).await?;
            println!("🗑️ Deleted quote {}", id);
        }
        Command::List => {
            let quotes = service.list().await?;
            if quotes.is_empty() {
                println!("No quotes saved yet.");
            }
            for quote in quotes {
                println!(
                    "{} | {} | {} | {} ({})",
                    quote.id,
                    format_date_br(quote.date),
                    quote.customer,
                    quote.status,
                    format_brl(quote.total)
                );
            }
        }
        Command::Show { id, json } => {
            let document = service.document(&QuoteId::from(id)).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&document)?);
            } else {
                print!("{}", document.to_text());
                println!("\n{}", document.file_name());
            }
        }
        Command::Share { id } => {
            println!("{}", service.share_link(&QuoteId::from(id)).await?);
        }
        Command::Report { from, to, json } => {
            let from = from.as_deref().map(parse_date_arg).transpose()?;
            let to = to.as_deref().map(parse_date_arg).transpose()?;
            let summary = service.report(from, to).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("💰 Faturamento: {}", format_brl(summary.revenue));
                println!("📄 Orçamentos: {}", summary.count);
                println!("🎯 Ticket Médio: {}", format_brl(summary.average_ticket));
                println!("📌 Por Status");
                for (status, total) in &summary.by_status {
                    println!("  {:<14} {}", status, format_brl(*total));
                }
                println!("📈 Evolução Mensal");
                for (month, total) in &summary.by_month {
                    println!("  {:<14} {}", month, format_brl(*total));
                }
            }
        }
        Command::Export { output } => {
            let quotes = service.list().await?;
            let archive = build_archive(&quotes)?;
            LocalStorage::new(".").write_file(&output, &archive).await?;
            println!("📦 Exported {} quotes to {}", quotes.len(), output);
        }
    }
    Ok(())
}

async fn create_form(args: &CreateArgs) -> quote_desk::Result<QuoteForm> {
    let date = match &args.date {
        Some(text) => parse_date_arg(text)?,
        None => Local::now().date_naive(),
    };
    Ok(QuoteForm {
        date,
        customer: args.customer.clone(),
        contact: args.contact.clone(),
        status: parse_status_arg(&args.status)?,
        rows: args.items.rows().await?,
    })
}

/// Stored values, overridden by whatever was passed on the command line.
async fn update_form<R: QuoteStore>(
    service: &QuoteService<R, AppConfig>,
    id: &QuoteId,
    args: &UpdateArgs,
) -> quote_desk::Result<QuoteForm> {
    let mut form = service.edit_form(id).await?;
    if let Some(customer) = &args.customer {
        form.customer = customer.clone();
    }
    if let Some(contact) = &args.contact {
        form.contact = contact.clone();
    }
    if let Some(date) = &args.date {
        form.date = parse_date_arg(date)?;
    }
    if let Some(status) = &args.status {
        form.status = parse_status_arg(status)?;
    }
    if !args.items.is_empty() {
        form.rows = args.items.rows().await?;
    }
    Ok(form)
}
