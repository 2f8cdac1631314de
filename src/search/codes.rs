//! Filter codes understood by the job board, with display labels.

/// Origin tag for searches started from the job search page filters
pub const ORIGIN_JOB_SEARCH: &str = "JOB_SEARCH_PAGE_JOB_FILTER";
/// Origin tag for searches that switched vertical from general results
pub const ORIGIN_SEARCH_RESULTS: &str = "SWITCH_SEARCH_VERTICAL";
/// Origin tag for searches launched from the jobs home page
pub const ORIGIN_DIRECT: &str = "JOBS_HOME_VERTICAL_IN_SEARCH";

pub const WORKPLACE_ON_SITE: &str = "1";
pub const WORKPLACE_REMOTE: &str = "2";
pub const WORKPLACE_HYBRID: &str = "3";

/// On-site and hybrid
pub const DEFAULT_WORKPLACE_TYPES: [&str; 2] = [WORKPLACE_ON_SITE, WORKPLACE_HYBRID];

pub const EXPERIENCE_LEVELS: &[(&str, &str)] = &[
    ("1", "Internship"),
    ("2", "Entry level"),
    ("3", "Associate"),
    ("4", "Mid-Senior level"),
    ("5", "Director"),
    ("6", "Executive"),
];

pub const JOB_TYPES: &[(&str, &str)] = &[
    ("F", "Full-time"),
    ("P", "Part-time"),
    ("C", "Contract"),
    ("T", "Temporary"),
    ("I", "Internship"),
    ("V", "Volunteer"),
    ("O", "Other"),
];

pub const WORKPLACE_TYPES: &[(&str, &str)] = &[
    (WORKPLACE_ON_SITE, "On-site"),
    (WORKPLACE_REMOTE, "Remote"),
    (WORKPLACE_HYBRID, "Hybrid"),
];

/// Radius choices offered by the search form; `None` is any distance
pub const DISTANCE_OPTIONS: &[(Option<u32>, &str)] = &[
    (None, "Any distance"),
    (Some(5), "5 miles"),
    (Some(10), "10 miles"),
    (Some(25), "25 miles"),
    (Some(50), "50 miles"),
    (Some(75), "75 miles"),
    (Some(100), "100 miles"),
];

pub const POPULAR_LOCATIONS: &[&str] = &[
    "Remote",
    "United States",
    "United Kingdom",
    "Canada",
    "Germany",
    "Turkey",
    "Netherlands",
    "Australia",
    "San Francisco, CA",
    "New York, NY",
    "London, UK",
    "Berlin, Germany",
    "Istanbul, Turkey",
    "Ankara, Turkey",
];

fn lookup(table: &[(&str, &'static str)], code: &str) -> Option<&'static str> {
    table.iter().find(|(c, _)| *c == code).map(|(_, label)| *label)
}

pub fn experience_label(code: &str) -> Option<&'static str> {
    lookup(EXPERIENCE_LEVELS, code)
}

pub fn job_type_label(code: &str) -> Option<&'static str> {
    lookup(JOB_TYPES, code)
}

pub fn workplace_label(code: &str) -> Option<&'static str> {
    lookup(WORKPLACE_TYPES, code)
}

/// Render a list of codes as labels, keeping unknown codes verbatim
pub fn describe_codes(codes: &[String], label: fn(&str) -> Option<&'static str>) -> String {
    codes
        .iter()
        .map(|code| label(code).map(str::to_string).unwrap_or_else(|| code.clone()))
        .collect::<Vec<_>>()
        .join(", ")
}
