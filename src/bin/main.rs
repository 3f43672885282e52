//! `emojitell` command line.
//!
//! ```bash
//! emojitell convert "I am happy today" --mode emoji-combo --style minimal
//! echo "Good morning!" | emojitell convert --save
//! emojitell custom add yay "🥳 🎉"
//! emojitell history list
//! ```

use clap::{Args, Parser, Subcommand};
use crossterm::style::Stylize;
use emoji_core::overlay::CustomOverlay;
use emoji_core::persistence::{JsonFileStore, RecordStore};
use emoji_core::remote::{reassemble, HttpTranslator};
use emoji_core::{Config, ConversionRequest, EmojiEngine, Mode, NewRecord, Source, Style};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Turn plain text into emoji-enhanced text
#[derive(Parser, Debug)]
#[command(name = "emojitell")]
#[command(version)]
struct Cli {
    /// Translation endpoint (overrides EMOJITELL_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory for saved translations and custom emojis
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert text; reads stdin when TEXT is omitted or "-"
    Convert(ConvertArgs),
    /// Print a sample input for a mode
    Example {
        #[arg(long, default_value = "emojify", value_parser = parse_mode)]
        mode: Mode,
    },
    /// Ask the endpoint for five emojis matching QUERY
    Recommend { query: String },
    /// Manage saved translations
    #[command(subcommand)]
    History(HistoryCommand),
    /// Manage custom word mappings
    #[command(subcommand)]
    Custom(CustomCommand),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    text: Option<String>,

    /// emoji-combo, emojify or xiaohongshu (also: combo, line-prefix)
    #[arg(short, long, default_value = "emojify", value_parser = parse_mode)]
    mode: Mode,

    /// standard, minimal, expressive or random
    #[arg(short, long, default_value = "standard")]
    style: String,

    /// Wait for the whole result instead of streaming it
    #[arg(long)]
    no_stream: bool,

    /// Skip the endpoint and use the built-in dictionary
    #[arg(long)]
    local: bool,

    /// Extra mapping for this call, e.g. --custom "yay=🥳,🎉"
    #[arg(long = "custom", value_name = "WORD=EMOJIS")]
    custom: Vec<String>,

    /// Save the result to history
    #[arg(long)]
    save: bool,
}

#[derive(Subcommand, Debug)]
enum HistoryCommand {
    List,
    Delete { id: String },
    Clear,
}

#[derive(Subcommand, Debug)]
enum CustomCommand {
    List,
    Add { word: String, emojis: String },
    Remove { word: String },
}

fn parse_mode(raw: &str) -> Result<Mode, String> {
    Mode::from_name(raw).ok_or_else(|| format!("unknown mode '{raw}'"))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let mut config = Config::from_env();
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match cli.command {
        Command::Convert(args) => convert(&config, args),
        Command::Example { mode } => {
            println!("{}", mode.example_text());
            Ok(())
        }
        Command::Recommend { query } => recommend(&config, &query),
        Command::History(cmd) => history(&config, cmd),
        Command::Custom(cmd) => custom(&config, cmd),
    }
}

fn convert(config: &Config, args: ConvertArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = match args.text.as_deref() {
        Some(text) if text != "-" => text.to_string(),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let style = Style::from_name(&args.style);

    let mut engine = EmojiEngine::from_config(config)?;
    if args.local {
        engine = engine.without_translator();
    }
    for entry in &args.custom {
        let (word, emojis) = entry.split_once('=').unwrap_or((entry.as_str(), ""));
        engine.add_custom_mapping(word, emojis)?;
    }

    let request = ConversionRequest {
        text: &text,
        mode: args.mode,
        style,
        streaming: !args.no_stream,
    };
    let mut stdout = io::stdout();
    let mut streamed = false;
    let conversion = engine.convert(request, |fragment| {
        streamed = true;
        let _ = write!(stdout, "{fragment}");
        let _ = stdout.flush();
    });
    let conversion = match conversion {
        Ok(conversion) => conversion,
        Err(err) => {
            eprintln!("{}", err.to_string().red());
            std::process::exit(1);
        }
    };

    if conversion.source == Source::Local && streamed {
        println!();
    }
    if let Some(reason) = &conversion.remote_error {
        eprintln!("{}", format!("{reason}. Using local translation as a fallback.").yellow());
    }
    if streamed && conversion.source == Source::Remote {
        println!();
    } else {
        println!("{}", conversion.text);
    }

    if args.save {
        let mut store = JsonFileStore::new(config.history_path(), config.history_capacity);
        let saved = store.save(NewRecord {
            original_text: text,
            emoji_text: conversion.text,
            style,
            mode: Some(args.mode),
        })?;
        eprintln!("{} {}", "Message saved!".green(), saved.id.dark_grey());
    }
    Ok(())
}

fn recommend(config: &Config, query: &str) -> Result<(), Box<dyn std::error::Error>> {
    let translator = HttpTranslator::new(config)?;
    let stream = translator.recommend(query)?;
    let mut stdout = io::stdout();
    reassemble(stream, |fragment| {
        let _ = write!(stdout, "{fragment}");
        let _ = stdout.flush();
    })?;
    println!();
    Ok(())
}

fn history(config: &Config, cmd: HistoryCommand) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = JsonFileStore::new(config.history_path(), config.history_capacity);
    match cmd {
        HistoryCommand::List => {
            let records = store.list()?;
            if records.is_empty() {
                eprintln!("No saved messages yet.");
            }
            for record in records {
                let mode = record.mode.map(|m| m.wire_name()).unwrap_or("-");
                println!("{} [{} / {}] {}", record.id.as_str().dark_grey(), mode, record.style, record.created_at);
                println!("  {}", record.original_text);
                println!("  {}", record.emoji_text);
            }
        }
        HistoryCommand::Delete { id } => store.delete(&id)?,
        HistoryCommand::Clear => store.clear_all()?,
    }
    Ok(())
}

fn custom(config: &Config, cmd: CustomCommand) -> Result<(), Box<dyn std::error::Error>> {
    let path = config.overlay_path();
    let mut overlay = CustomOverlay::load_json(&path)?;
    match cmd {
        CustomCommand::List => {
            for (word, emojis) in overlay.iter() {
                println!("{word}: {}", emojis.join(" "));
            }
        }
        CustomCommand::Add { word, emojis } => {
            overlay.add_from_input(&word, &emojis)?;
            overlay.save_json(&path)?;
            eprintln!("{}", format!("\"{}\" will now convert to your custom emojis.", word.trim()).green());
        }
        CustomCommand::Remove { word } => {
            if overlay.remove(&word) {
                overlay.save_json(&path)?;
            }
        }
    }
    Ok(())
}
