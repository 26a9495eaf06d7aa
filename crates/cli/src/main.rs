use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

use chw_core::config::{resolve_catalog_dir, season_month_from_env_value};
use chw_core::{
    tokenize_symptoms, CoreConfig, DiagnosisEngine, Gender, KnowledgeBase, PatientProfile,
    ReferralUrgency,
};

#[derive(Parser)]
#[command(name = "chw")]
#[command(about = "Community health worker symptom analysis CLI")]
struct Cli {
    /// Directory with diseases.yaml, outbreaks.yaml and locations.yaml (defaults to the
    /// embedded catalog, or CHW_CATALOG_DIR)
    #[arg(long, global = true, env = "CHW_CATALOG_DIR")]
    catalog_dir: Option<PathBuf>,
    /// Calendar month 1-12 to use for seasonal risk instead of today's month
    #[arg(long, global = true)]
    month: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum GenderArg {
    Male,
    Female,
}

impl From<GenderArg> for Gender {
    fn from(value: GenderArg) -> Self {
        match value {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ReferralArg {
    Immediate,
    Within24h,
    WithinWeek,
}

impl From<ReferralArg> for ReferralUrgency {
    fn from(value: ReferralArg) -> Self {
        match value {
            ReferralArg::Immediate => ReferralUrgency::Immediate,
            ReferralArg::Within24h => ReferralUrgency::Within24h,
            ReferralArg::WithinWeek => ReferralUrgency::WithinWeek,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse free-text symptoms and print the result as JSON
    Analyze {
        /// Patient age in years
        #[arg(long, allow_negative_numbers = true)]
        age: i64,
        /// Patient gender
        #[arg(long, value_enum)]
        gender: GenderArg,
        /// Patient location (county)
        #[arg(long)]
        location: Option<String>,
        /// Ignore active outbreaks when scoring
        #[arg(long)]
        no_outbreak_context: bool,
        /// Symptoms, e.g. "fever, chills, headache"
        text: String,
    },
    /// List the disease catalog
    Diseases,
    /// List outbreak records
    Outbreaks {
        /// Only outbreaks at this location
        #[arg(long)]
        location: Option<String>,
        /// Only warning and emergency outbreaks
        #[arg(long)]
        alerts: bool,
    },
    /// Outbreak count and total cases per county
    Counties,
    /// List or search health facilities
    Facilities {
        /// Only facilities in this county
        #[arg(long)]
        county: Option<String>,
        /// Free-text search over names, locations, services and specialties
        #[arg(long)]
        search: Option<String>,
        /// Referral destinations in --county for this urgency, highest level first
        #[arg(long, value_enum, requires = "county")]
        referral: Option<ReferralArg>,
    },
}

fn load_engine(cli: &Cli) -> Result<DiagnosisEngine, Box<dyn std::error::Error>> {
    let catalog_dir = resolve_catalog_dir(cli.catalog_dir.clone())?;
    let season_month = season_month_from_env_value(cli.month.clone())?;
    let cfg = Arc::new(CoreConfig::new(season_month, catalog_dir, true)?);
    let kb = Arc::new(KnowledgeBase::load(cfg.catalog_dir())?);
    Ok(DiagnosisEngine::with_in_memory_feedback(cfg, kb))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let engine = load_engine(&cli)?;
    let kb = engine.knowledge();

    match cli.command {
        Some(Commands::Analyze {
            age,
            gender,
            location,
            no_outbreak_context,
            text,
        }) => {
            let profile =
                PatientProfile::new(age, gender.into(), location.clone().unwrap_or_default())?;
            let symptoms = tokenize_symptoms(&text);
            let result = engine.analyze(
                symptoms.as_slice(),
                &profile,
                location.as_deref(),
                !no_outbreak_context,
            )?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Some(Commands::Diseases) => {
            for disease in kb.diseases() {
                let category = format!("{:?}", disease.category);
                println!(
                    "{:<16} {:<28} {:<12} triage: {:?}",
                    disease.id, disease.name, category, disease.triage_level
                );
            }
        }
        Some(Commands::Outbreaks { location, alerts }) => {
            let outbreaks = if alerts {
                kb.active_alerts(location.as_deref())
            } else {
                kb.outbreaks(location.as_deref())
            };
            if outbreaks.is_empty() {
                println!("No outbreaks found.");
            }
            for outbreak in outbreaks {
                println!(
                    "{} in {}: {} cases, {:?} since {} - {}",
                    outbreak.disease,
                    outbreak.location,
                    outbreak.cases,
                    outbreak.alert_level,
                    outbreak.start_date,
                    outbreak.description
                );
            }
        }
        Some(Commands::Counties) => {
            for total in kb.county_case_totals() {
                println!(
                    "{:<12} outbreaks: {}, cases: {}",
                    total.county, total.outbreaks, total.total_cases
                );
            }
        }
        Some(Commands::Facilities {
            county,
            search,
            referral,
        }) => {
            let facilities = match (referral, county.as_deref()) {
                (Some(urgency), Some(county)) => kb.referral_facilities(county, urgency.into()),
                _ => kb
                    .search_facilities(search.as_deref().unwrap_or(""))
                    .into_iter()
                    .filter(|f| county.as_deref().map_or(true, |c| f.county == c))
                    .collect(),
            };
            if facilities.is_empty() {
                println!("No facilities found.");
            }
            for facility in facilities {
                println!(
                    "{} ({:?}), {}/{}, tel {}, wait {}",
                    facility.name,
                    facility.level,
                    facility.county,
                    facility.sub_county,
                    facility.phone,
                    facility.wait_time
                );
            }
        }
        None => {
            println!("No command given. Run with --help for usage.");
        }
    }

    Ok(())
}
