use std::path::PathBuf;

use clap::Parser;
use log::warn;

use exam_quiz::{App, PassPolicy, Quiz, Translations};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file to load the questions from
    #[arg(short, long)]
    questions: PathBuf,

    /// Optional JSON table of localized UI labels
    #[arg(short, long)]
    translations: Option<PathBuf>,

    /// Language to start in
    #[arg(long, default_value = "de")]
    lang: String,

    /// Languages the `l` key cycles through
    #[arg(long, value_delimiter = ',', default_value = "de,al")]
    langs: Vec<String>,

    /// How many questions one attempt draws from the bank
    #[arg(long, default_value_t = 33)]
    sample_size: usize,

    /// Pass when correct/total reaches this fraction
    #[arg(long, default_value_t = 0.5, conflicts_with = "pass_correct")]
    pass_fraction: f64,

    /// Pass when at least this many answers are correct
    #[arg(long)]
    pass_correct: Option<usize>,
}

fn main() {
    pretty_env_logger::init();
    let args = Args::parse();

    let bank = match exam_quiz::load_questions(&args.questions) {
        Ok(bank) => bank,
        Err(e) => {
            eprintln!("Error loading questions: {}", e);
            std::process::exit(1);
        }
    };

    // A broken label table degrades to the built-in defaults.
    let translations = match &args.translations {
        Some(path) => exam_quiz::load_translations(path).unwrap_or_else(|e| {
            warn!("{}; using default labels", e);
            Translations::default()
        }),
        None => Translations::default(),
    };

    let policy = match args.pass_correct {
        Some(threshold) => PassPolicy::CorrectAtLeast(threshold),
        None => PassPolicy::FractionAtLeast(args.pass_fraction),
    };

    let app = App::new(
        bank,
        translations,
        args.langs,
        args.lang,
        args.sample_size,
        policy,
    );

    if let Err(e) = Quiz::new(app).run() {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
