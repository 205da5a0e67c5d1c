use chrono::Local;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use carbonledger::catalog::{self, Catalog, QuestionId};
use carbonledger::config::AppConfig;
use carbonledger::emissions::{EmissionsCalculator, LocaleTable};
use carbonledger::error::AppError;
use carbonledger::survey::{
    default_survey_year, format_metric_tons, format_usd, AnswerValue, Group, GroupId,
    MemoryAnswerRepository, MemoryEmissionsRepository, MemoryMemberRepository,
    SaveAnswerResponse, SurveyService, User, UserId,
};
use carbonledger::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Carbon Ledger",
    about = "Validate survey catalogs and demonstrate the emissions engine from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a question catalog and locale table
    Validate(ValidateArgs),
    /// Run an end-to-end survey demo against in-memory storage
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
struct ValidateArgs {
    /// Catalog JSON file; defaults to the built-in survey
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Locale averages CSV file; defaults to the built-in table
    #[arg(long)]
    locales: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
struct DemoArgs {
    /// Survey year; defaults to the open survey year
    #[arg(long)]
    year: Option<i32>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Validate(ValidateArgs::default()));

    match command {
        Command::Validate(args) => run_validate(&config, args),
        Command::Demo(args) => run_demo(&config, args),
    }
}

fn load_catalog(config: &AppConfig, override_path: Option<&PathBuf>) -> Result<Catalog, AppError> {
    let path = override_path.or(config.survey.catalog_path.as_ref());
    Ok(match path {
        Some(path) => {
            info!(path = %path.display(), "loading catalog");
            catalog::load_from_path(path)?
        }
        None => Catalog::standard(),
    })
}

fn load_locales(config: &AppConfig, override_path: Option<&PathBuf>) -> Result<LocaleTable, AppError> {
    let path = override_path.or(config.survey.locales_path.as_ref());
    Ok(match path {
        Some(path) => {
            info!(path = %path.display(), "loading locale table");
            LocaleTable::from_path(path)?
        }
        None => LocaleTable::standard(),
    })
}

fn run_validate(config: &AppConfig, args: ValidateArgs) -> Result<(), AppError> {
    let catalog = load_catalog(config, args.catalog.as_ref())?;
    let locales = load_locales(config, args.locales.as_ref())?;

    println!("Catalog OK: {} questions", catalog.len());
    for group in carbonledger::catalog::QuestionGroup::ordered() {
        let count = catalog
            .questions()
            .iter()
            .filter(|question| question.group == group)
            .count();
        println!("  - {}: {} questions", group.label(), count);
    }

    let sample = ["US-IL", "US-NY", "CA-ON"];
    let known = sample
        .iter()
        .filter(|locale| locales.annual_average(locale).is_some())
        .count();
    println!("Locale table OK ({known}/{} sample locales present)", sample.len());

    Ok(())
}

fn run_demo(config: &AppConfig, args: DemoArgs) -> Result<(), AppError> {
    let year = args
        .year
        .or(config.survey.survey_year)
        .unwrap_or_else(|| default_survey_year(Local::now().date_naive()));
    let now = Local::now().naive_local();

    let catalog = load_catalog(config, None)?;
    let locales = load_locales(config, None)?;
    let calculator = match config.survey.offset_price {
        Some(price) => EmissionsCalculator::with_price(price),
        None => EmissionsCalculator::new(),
    };

    let answers = Arc::new(MemoryAnswerRepository::default());
    let emissions = Arc::new(MemoryEmissionsRepository::default());
    let members = Arc::new(MemoryMemberRepository::default());
    let service = SurveyService::new(catalog, locales, calculator, answers, emissions, members);

    let group = Group {
        id: GroupId(1),
        name: "demo-collective".to_string(),
        label: "Demo Collective".to_string(),
        kind: carbonledger::catalog::GroupKind::Office,
    };
    let ada = User {
        id: UserId(1),
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
    };
    let grace = User {
        id: UserId(2),
        name: "Grace".to_string(),
        email: "grace@example.com".to_string(),
    };

    println!("Carbon calculator demo ({} survey, year {year})", group.label);

    service.save_member(&group, year, &ada, "US-IL", 12, true, false, now)?;
    service.save_member(&group, year, &grace, "US-NY", 6, false, false, now)?;
    println!("- Registered 2 members (both start on the standard estimate)");

    // Ada fills in a few transportation answers.
    let submissions = [
        ("TC", AnswerValue::Number(1.0), None),
        ("CM", AnswerValue::Number(120.0), Some(52.0)),
        ("TF", AnswerValue::Number(1.0), None),
        ("FL", AnswerValue::Number(2.0), None),
        ("HD", AnswerValue::Number(6.0), None),
    ];
    for (question, value, select) in submissions {
        let response = service.save_answer(
            &group,
            year,
            Some(&ada),
            QuestionId::from(question),
            value,
            select,
            now,
        )?;
        if let SaveAnswerResponse::Invalid { message } = response {
            println!("  {question} rejected: {message}");
        }
    }

    // The group profile records the shared office footprint.
    service.save_answer(
        &group,
        year,
        None,
        QuestionId::from("OA"),
        AnswerValue::Number(2400.0),
        None,
        now,
    )?;
    service.save_answer(
        &group,
        year,
        None,
        QuestionId::from("WA"),
        AnswerValue::Items(vec![200.0, 150.0]),
        None,
        now,
    )?;

    let page = service.questions(&group, year, Some(&ada))?;
    println!(
        "- Ada's survey: {}% complete, next question {}",
        page.overview.progress_percent,
        page.overview
            .goto
            .map(|id| id.to_string())
            .unwrap_or_else(|| "none".to_string())
    );
    println!(
        "  Computed so far: {} MT -> {}",
        page.emissions_display, page.offset_display
    );

    let dashboard = service.group_dashboard(&group, year, Some(&ada))?;
    println!("- Group dashboard:");
    for member in &dashboard.members {
        let source = if member.is_standard {
            "estimated"
        } else {
            "computed"
        };
        println!(
            "  - {}: {} MT ({source}) -> {}",
            member.name,
            member.emissions_display,
            format_usd(member.offset_amount)
        );
    }
    println!(
        "  Total: {} MT -> {}",
        format_metric_tons(dashboard.emissions),
        format_usd(dashboard.offset_amount)
    );
    if let Some(task) = dashboard.task {
        println!("  Next action for Ada: {}", task.key.label());
    }

    Ok(())
}
