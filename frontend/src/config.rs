use shared::SignupConfig;

/// Member table used when `SUPABASE_TABLE` is not set at build time
pub const DEFAULT_MEMBER_TABLE: &str = "vendegek";

/// Connection settings of the hosted member table
#[derive(Debug, Clone, PartialEq)]
pub struct SupabaseConfig {
    /// Project URL without trailing slash, e.g. "https://xyz.supabase.co"
    pub url: String,
    pub anon_key: String,
    pub table: String,
}

/// Application configuration, baked in at build time
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// `None` runs the wizard against an in-memory table (offline mode)
    pub supabase: Option<SupabaseConfig>,
    pub signup: SignupConfig,
}

impl AppConfig {
    /// Read `SUPABASE_URL`, `SUPABASE_ANON_KEY` and `SUPABASE_TABLE` from the
    /// build environment
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("SUPABASE_URL"),
            option_env!("SUPABASE_ANON_KEY"),
            option_env!("SUPABASE_TABLE"),
        )
    }

    pub fn from_values(url: Option<&str>, anon_key: Option<&str>, table: Option<&str>) -> Self {
        let non_empty = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let supabase = match (non_empty(url), non_empty(anon_key)) {
            (Some(url), Some(anon_key)) => Some(SupabaseConfig {
                url: url.trim_end_matches('/').to_string(),
                anon_key,
                table: non_empty(table).unwrap_or_else(|| DEFAULT_MEMBER_TABLE.to_string()),
            }),
            _ => None,
        };

        Self {
            supabase,
            signup: SignupConfig::default(),
        }
    }

    pub fn is_offline(&self) -> bool {
        self.supabase.is_none()
    }
}
