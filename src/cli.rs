use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use job_scout::models::{Settings, SettingsPatch, Theme};
use job_scout::search::codes::ORIGIN_JOB_SEARCH;
use job_scout::{SearchParams, SortBy};

/// Build, analyze and keep track of job search URLs
#[derive(Parser)]
#[command(name = "job-scout")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (TOML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for favorites, history and settings
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a search URL and record it in history
    Build {
        #[command(flatten)]
        search: SearchArgs,

        #[command(flatten)]
        delivery: DeliveryArgs,

        /// Print the URL and analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyze an existing search URL
    Analyze {
        url: String,

        #[arg(long)]
        json: bool,
    },

    /// Browse and manage search history
    #[command(subcommand)]
    History(HistoryCommand),

    /// Manage saved searches
    #[command(subcommand)]
    Favorites(FavoritesCommand),

    /// Show or change settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// List the named time-filter presets
    TimeFilters,
}

#[derive(Subcommand)]
pub enum HistoryCommand {
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long)]
        per_page: Option<usize>,
    },
    Delete {
        id: String,
    },
    Clear,
    Load {
        id: String,

        #[command(flatten)]
        delivery: DeliveryArgs,
    },
}

#[derive(Subcommand)]
pub enum FavoritesCommand {
    List,
    Save {
        name: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long = "tag")]
        tags: Vec<String>,

        #[command(flatten)]
        search: SearchArgs,
    },
    Load {
        id: String,

        #[command(flatten)]
        delivery: DeliveryArgs,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    Show,
    Set(SettingsArgs),
}

#[derive(Args, Default)]
pub struct DeliveryArgs {
    /// Copy the URL to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Open the URL in a browser
    #[arg(long)]
    pub open: bool,
}

#[derive(Args, Default)]
pub struct SearchArgs {
    #[arg(short, long)]
    pub keywords: Option<String>,

    #[arg(short, long)]
    pub location: Option<String>,

    /// Radius in miles
    #[arg(short, long)]
    pub distance: Option<f64>,

    #[arg(long)]
    pub geo_id: Option<String>,

    /// Raw time token such as r86400
    #[arg(long, conflicts_with = "hours")]
    pub time_posted: Option<String>,

    /// Only jobs posted within this many hours
    #[arg(long)]
    pub hours: Option<f64>,

    /// Experience level codes (1-6), comma separated
    #[arg(long, value_delimiter = ',')]
    pub experience: Vec<String>,

    /// Job type codes (F,P,C,T,I,V,O), comma separated
    #[arg(long, value_delimiter = ',')]
    pub job_type: Vec<String>,

    /// Workplace type codes (1 on-site, 2 remote, 3 hybrid)
    #[arg(long, value_delimiter = ',', conflicts_with = "any_workplace")]
    pub workplace: Vec<String>,

    /// Drop the default workplace filter
    #[arg(long)]
    pub any_workplace: bool,

    /// R (relevance) or DD (date posted)
    #[arg(long)]
    pub sort: Option<SortBy>,

    #[arg(long)]
    pub current_job_id: Option<String>,

    #[arg(long)]
    pub origin: Option<String>,
}

impl SearchArgs {
    /// Form values, with unset filters taken from `settings`
    pub fn into_params(self, settings: &Settings) -> SearchParams {
        let mut params = SearchParams::default();
        params.sort_by = Some(self.sort.unwrap_or(settings.default_sort_by));
        params.workplace_type = if self.any_workplace {
            Vec::new()
        } else if self.workplace.is_empty() {
            settings.default_workplace_types.clone()
        } else {
            self.workplace
        };

        if self.keywords.is_some() {
            params.keywords = self.keywords;
        }
        if self.location.is_some() {
            params.location = self.location;
        }
        if self.distance.is_some() {
            params.distance = self.distance;
        }
        if self.geo_id.is_some() {
            params.geo_id = self.geo_id;
        }
        if self.time_posted.is_some() {
            params.time_posted = self.time_posted;
        }
        params.custom_hours = self.hours;
        params.experience_level = self.experience;
        params.job_type = self.job_type;
        params.current_job_id = self.current_job_id.or(params.current_job_id);
        params.origin = Some(self.origin.unwrap_or_else(|| ORIGIN_JOB_SEARCH.to_string()));
        params
    }
}

#[derive(Args)]
pub struct SettingsArgs {
    #[arg(long)]
    pub theme: Option<Theme>,

    #[arg(long)]
    pub auto_save: Option<bool>,

    #[arg(long)]
    pub max_history: Option<usize>,

    #[arg(long)]
    pub show_analytics: Option<bool>,

    #[arg(long)]
    pub default_sort: Option<SortBy>,

    #[arg(long, value_delimiter = ',')]
    pub default_workplace: Option<Vec<String>>,

    #[arg(long)]
    pub language: Option<String>,
}

impl From<SettingsArgs> for SettingsPatch {
    fn from(args: SettingsArgs) -> Self {
        SettingsPatch {
            theme: args.theme,
            auto_save_history: args.auto_save,
            max_history_items: args.max_history,
            show_analytics: args.show_analytics,
            default_sort_by: args.default_sort,
            default_workplace_types: args.default_workplace,
            language: args.language,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn unset_filters_follow_settings() {
        let settings = Settings {
            default_sort_by: SortBy::Relevance,
            default_workplace_types: vec!["2".into()],
            ..Settings::default()
        };
        let params = SearchArgs { keywords: Some("rust".into()), ..SearchArgs::default() }
            .into_params(&settings);
        assert_eq!(params.sort_by, Some(SortBy::Relevance));
        assert_eq!(params.workplace_type, vec!["2"]);
        assert_eq!(params.keywords.as_deref(), Some("rust"));
        assert_eq!(params.distance, Some(100.0));
    }

    #[test]
    fn parses_comma_lists() {
        let cli = Cli::try_parse_from([
            "job-scout", "build", "-k", "Rust", "--experience", "2,4", "--any-workplace",
        ])
        .unwrap();
        match cli.command {
            Commands::Build { search, .. } => {
                assert_eq!(search.experience, vec!["2", "4"]);
                assert!(search.any_workplace);
            }
            _ => panic!("expected build"),
        }
    }
}
