use crate::infra::load_finder;
use chrono::Local;
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;
use uni_finder::config::AppConfig;
use uni_finder::error::AppError;
use uni_finder::finder::router::NO_MATCHES_MESSAGE;
use uni_finder::finder::{
    CountrySelection, ProfileInput, RankedUniversity, Recommendation, Tier, SAT_MIN,
};
use uni_finder::telemetry;

#[derive(Args, Debug, Default, Clone)]
pub(crate) struct TableArgs {
    /// Reference weight table CSV (defaults to FINDER_WEIGHTS_CSV)
    #[arg(long)]
    pub(crate) weights: Option<PathBuf>,
    /// University threshold table CSV (defaults to FINDER_UNIVERSITIES_CSV)
    #[arg(long)]
    pub(crate) universities: Option<PathBuf>,
}

impl TableArgs {
    pub(crate) fn apply(self, config: &mut AppConfig) {
        if let Some(path) = self.weights {
            config.data.weights_csv = path;
        }
        if let Some(path) = self.universities {
            config.data.universities_csv = path;
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    #[command(flatten)]
    pub(crate) tables: TableArgs,
    /// Country to score (repeatable; omit or pass "All" for every country)
    #[arg(long = "country")]
    pub(crate) countries: Vec<String>,
    /// Class 9 percentage (0-100)
    #[arg(long = "class-9", default_value_t = 0.0)]
    pub(crate) class_9: f64,
    /// Class 10 percentage (0-100)
    #[arg(long = "class-10", default_value_t = 0.0)]
    pub(crate) class_10: f64,
    /// Class 11 percentage (0-100)
    #[arg(long = "class-11", default_value_t = 0.0)]
    pub(crate) class_11: f64,
    /// Class 12 percentage (0-100)
    #[arg(long = "class-12", default_value_t = 0.0)]
    pub(crate) class_12: f64,
    /// SAT/ACT score on the 400-1600 scale
    #[arg(long, default_value_t = SAT_MIN)]
    pub(crate) sat: f64,
    /// AP score 0-5 (repeatable, up to five)
    #[arg(long = "ap")]
    pub(crate) ap_scores: Vec<f64>,
    /// Co-curricular activities (0-3)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) co_curricular: f64,
    /// Extra-curricular activities (0-3)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) extra_curricular: f64,
    /// Internships (0-2)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) internships: f64,
    /// Completed community service
    #[arg(long)]
    pub(crate) community_service: bool,
    /// Completed a research project
    #[arg(long)]
    pub(crate) research_project: bool,
    /// Letters of recommendation (0-3)
    #[arg(long, default_value_t = 0.0)]
    pub(crate) lors: f64,
    /// Print the result as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

impl RecommendArgs {
    pub(crate) fn profile(&self) -> ProfileInput {
        ProfileInput {
            class_9: self.class_9,
            class_10: self.class_10,
            class_11: self.class_11,
            class_12: self.class_12,
            sat: self.sat,
            ap_scores: self.ap_scores.clone(),
            co_curricular: self.co_curricular,
            extra_curricular: self.extra_curricular,
            internships: self.internships,
            community_service: self.community_service,
            research_project: self.research_project,
            lors: self.lors,
        }
    }
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let profile = args.profile();
    profile.validate()?;

    let mut config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    args.tables.clone().apply(&mut config);

    let finder = load_finder(&config)?;
    let selection = CountrySelection::from_labels(&args.countries);
    let recommendation = finder.recommend(&profile, &selection);

    if args.json {
        let body = serde_json::to_string_pretty(&recommendation.summary())
            .map_err(std::io::Error::from)?;
        println!("{body}");
    } else {
        render_recommendation(&mut io::stdout().lock(), &recommendation, &selection)?;
    }

    Ok(())
}

pub(crate) fn run_countries(args: TableArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    args.apply(&mut config);

    let finder = load_finder(&config)?;
    for country in finder.tables().countries() {
        println!("{country}");
    }
    Ok(())
}

pub(crate) fn render_recommendation(
    out: &mut impl Write,
    recommendation: &Recommendation,
    selection: &CountrySelection,
) -> io::Result<()> {
    writeln!(out, "University finder")?;
    writeln!(out, "Generated {}", Local::now().format("%Y-%m-%d %H:%M"))?;

    let scope = match selection {
        CountrySelection::All => "all reference countries".to_string(),
        CountrySelection::Only(_) => recommendation
            .country_scores()
            .iter()
            .map(|score| score.country.label())
            .collect::<Vec<_>>()
            .join(", "),
    };
    writeln!(out, "Countries scored: {scope}")?;

    writeln!(out, "\nCountry-wise profile breakdown")?;
    if recommendation.country_scores().is_empty() {
        writeln!(out, "- none")?;
    }
    for score in recommendation.country_scores() {
        writeln!(
            out,
            "- {}: total {:.1}% (academic {:.1}%, activity {:.1}%, LOR {:.1}%)",
            score.country,
            score.total_score,
            score.academic_pct,
            score.activity_pct,
            score.recommendation_pct
        )?;
    }

    if recommendation.is_empty() {
        writeln!(out, "\n{NO_MATCHES_MESSAGE}")?;
        return Ok(());
    }

    writeln!(
        out,
        "\nUniversity gap analysis (positive gap = profile below requirement)"
    )?;
    for row in recommendation.universities() {
        let marker = if row.is_anchor { "  <- anchor" } else { "" };
        writeln!(out, "- {}{}", describe(row), marker)?;
    }

    for tier in Tier::ordered() {
        let band = recommendation.band(tier);
        writeln!(out, "\n{} ({})", tier.label(), tier.description())?;
        if band.is_empty() {
            writeln!(out, "- none")?;
        }
        for row in band {
            writeln!(out, "- {}", describe(row))?;
        }
    }

    Ok(())
}

fn describe(row: &RankedUniversity) -> String {
    let rank = match row.rank {
        Some(rank) => format!("QS {rank}"),
        None => "unranked".to_string(),
    };
    format!(
        "{} ({}, {}): required {:.1}, yours {:.1}, gap {:+.1}",
        row.university_name,
        row.country,
        rank,
        row.required_threshold,
        row.applicant_score,
        row.gap
    )
}
