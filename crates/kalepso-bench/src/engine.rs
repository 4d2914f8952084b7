//! Benchmark target engines.
//!
//! The set of engines is closed: each variant maps to a fixed default port and
//! to the adapter that knows its dialect.

use std::fmt;

use clap::ValueEnum;

/// Engine a benchmark run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Engine {
    /// Kalepso, served over the MySQL wire protocol.
    Kalepso,
    /// Stock MariaDB, used as the unencrypted baseline.
    Mariadb,
    /// Oracle with transparent column encryption.
    Oracle,
    /// SQL Server; only the workload text is produced.
    Microsoft,
}

/// How the driver talks to an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterKind {
    /// Full salary rows over the MySQL dialect.
    RelationalBulk,
    /// Single encrypted numeric column.
    EncryptedColumn,
    /// No live connection; workload printed for out-of-band replay.
    TextEmission,
}

impl Engine {
    /// All engines, in CLI order.
    pub const ALL: [Engine; 4] = [
        Engine::Kalepso,
        Engine::Mariadb,
        Engine::Oracle,
        Engine::Microsoft,
    ];

    /// Default TCP port the engine listens on.
    pub fn port(self) -> u16 {
        match self {
            Engine::Kalepso => 3306,
            Engine::Mariadb => 3307,
            Engine::Oracle => 1521,
            Engine::Microsoft => 1433,
        }
    }

    /// CLI name of the engine.
    pub fn name(self) -> &'static str {
        match self {
            Engine::Kalepso => "kalepso",
            Engine::Mariadb => "mariadb",
            Engine::Oracle => "oracle",
            Engine::Microsoft => "microsoft",
        }
    }

    /// Adapter variant that drives this engine.
    pub fn adapter_kind(self) -> AdapterKind {
        match self {
            Engine::Kalepso | Engine::Mariadb => AdapterKind::RelationalBulk,
            Engine::Oracle => AdapterKind::EncryptedColumn,
            Engine::Microsoft => AdapterKind::TextEmission,
        }
    }

    /// Default login for the engine's benchmark account.
    ///
    /// `None` for engines the benchmark never connects to.
    pub fn default_credentials(self) -> Option<(&'static str, &'static str)> {
        match self {
            Engine::Kalepso | Engine::Mariadb => Some(("root", "kalepso")),
            Engine::Oracle => Some(("dmytro", "password")),
            Engine::Microsoft => None,
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ports() {
        assert_eq!(Engine::Kalepso.port(), 3306);
        assert_eq!(Engine::Mariadb.port(), 3307);
        assert_eq!(Engine::Oracle.port(), 1521);
        assert_eq!(Engine::Microsoft.port(), 1433);
    }

    #[test]
    fn test_adapter_kinds() {
        assert_eq!(Engine::Kalepso.adapter_kind(), AdapterKind::RelationalBulk);
        assert_eq!(Engine::Mariadb.adapter_kind(), AdapterKind::RelationalBulk);
        assert_eq!(Engine::Oracle.adapter_kind(), AdapterKind::EncryptedColumn);
        assert_eq!(Engine::Microsoft.adapter_kind(), AdapterKind::TextEmission);
    }

    #[test]
    fn test_value_names_match_display() {
        for engine in Engine::ALL {
            let value = engine.to_possible_value().unwrap();
            assert_eq!(value.get_name(), engine.name());
            assert_eq!(Engine::from_str(engine.name(), false), Ok(engine));
        }
        assert!(Engine::from_str("postgres", false).is_err());
    }

    #[test]
    fn test_text_engine_has_no_credentials() {
        assert!(Engine::Microsoft.default_credentials().is_none());
        assert_eq!(Engine::Kalepso.default_credentials(), Some(("root", "kalepso")));
    }
}
