//! Data-service credentials from the environment.
//!
//! Deployments have historically used several prefixes for the same pair of
//! variables. Each prefix is checked as a complete pair; values from
//! different prefixes are never combined.

/// Variable name pairs checked in order: `(url, anon key)`.
pub const CREDENTIAL_VARS: &[(&str, &str)] = &[
    ("SUPABASE_URL", "SUPABASE_ANON_KEY"),
    ("VITE_SUPABASE_URL", "VITE_SUPABASE_ANON_KEY"),
    ("NEXT_PUBLIC_SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_ANON_KEY"),
];

/// Base URL and anonymous access key for the data service.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Project base URL, without trailing slash.
    pub url: String,
    /// Anonymous (public) API key.
    pub anon_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Resolve credentials using `lookup` to read variables.
    ///
    /// Returns the first pair in [`CREDENTIAL_VARS`] where both values are
    /// present and non-blank.
    pub fn resolve<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        CREDENTIAL_VARS.iter().find_map(|(url_var, key_var)| {
            let url = read(url_var)?;
            let anon_key = read(key_var)?;
            tracing::debug!(url_var = %url_var, "data service credentials resolved");
            Some(Self {
                url: url.trim_end_matches('/').to_string(),
                anon_key,
            })
        })
    }

    /// Resolve credentials from the process environment.
    pub fn from_env() -> Option<Self> {
        Self::resolve(|name| std::env::var(name).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn resolve(vars: &[(&str, &str)]) -> Option<Credentials> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Credentials::resolve(|name| map.get(name).cloned())
    }

    #[test]
    fn none_when_empty() {
        assert_eq!(resolve(&[]), None);
    }

    #[test]
    fn plain_pair() {
        let creds = resolve(&[
            ("SUPABASE_URL", "https://proj.supabase.co/"),
            ("SUPABASE_ANON_KEY", "anon"),
        ])
        .unwrap();
        assert_eq!(creds.url, "https://proj.supabase.co");
        assert_eq!(creds.anon_key, "anon");
    }

    #[test]
    fn vite_pair() {
        let creds = resolve(&[
            ("VITE_SUPABASE_URL", "https://vite.supabase.co"),
            ("VITE_SUPABASE_ANON_KEY", "vite-key"),
        ])
        .unwrap();
        assert_eq!(creds.url, "https://vite.supabase.co");
    }

    #[test]
    fn next_public_pair() {
        let creds = resolve(&[
            ("NEXT_PUBLIC_SUPABASE_URL", "https://next.supabase.co"),
            ("NEXT_PUBLIC_SUPABASE_ANON_KEY", "next-key"),
        ])
        .unwrap();
        assert_eq!(creds.anon_key, "next-key");
    }

    #[test]
    fn first_complete_pair_wins() {
        let creds = resolve(&[
            ("SUPABASE_URL", "https://incomplete.supabase.co"),
            ("VITE_SUPABASE_URL", "https://vite.supabase.co"),
            ("VITE_SUPABASE_ANON_KEY", "vite-key"),
        ])
        .unwrap();
        assert_eq!(creds.url, "https://vite.supabase.co");
        assert_eq!(creds.anon_key, "vite-key");
    }

    #[test]
    fn mixed_prefixes_are_not_combined() {
        let creds = resolve(&[
            ("VITE_SUPABASE_URL", "https://vite.supabase.co"),
            ("NEXT_PUBLIC_SUPABASE_ANON_KEY", "next-key"),
        ]);
        assert_eq!(creds, None);
    }

    #[test]
    fn blank_values_ignored() {
        let creds = resolve(&[("SUPABASE_URL", "  "), ("SUPABASE_ANON_KEY", "anon")]);
        assert_eq!(creds, None);
    }

    #[test]
    fn debug_redacts_key() {
        let creds = Credentials {
            url: "https://proj.supabase.co".to_string(),
            anon_key: "secret".to_string(),
        };
        let debug = format!("{creds:?}");
        assert!(debug.contains("proj.supabase.co"));
        assert!(!debug.contains("secret"));
    }
}
