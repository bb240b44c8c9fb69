//! INI file configuration adapter.

use crate::domain::error::CandlebotError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct IniConfigAdapter {
    config: Ini,
}

impl IniConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CandlebotError> {
        let mut config = Ini::new();
        config
            .load(path.as_ref())
            .map_err(|reason| CandlebotError::ConfigParse {
                file: path.as_ref().display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, CandlebotError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| CandlebotError::ConfigParse {
                file: "<inline>".into(),
                reason,
            })?;
        Ok(Self { config })
    }
}

impl ConfigPort for IniConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_usize(&self, section: &str, key: &str, default: usize) -> usize {
        self.config
            .getuint(section, key)
            .ok()
            .flatten()
            .map(|v| v as usize)
            .unwrap_or(default)
    }

    fn get_f64(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
[strategy]
kind = RSI
order_size = 0.01
initial_balance = 10000

[rsi]
period = 14
oversold = 30
overbought = 70

[data]
symbols = BTCUSDT, ETHUSDT
interval = 1h
limit = 100
";

    #[test]
    fn from_string_parses_sections() {
        let adapter = IniConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("strategy", "kind"),
            Some("RSI".to_string())
        );
        assert_eq!(
            adapter.get_string("data", "symbols"),
            Some("BTCUSDT, ETHUSDT".to_string())
        );
    }

    #[test]
    fn missing_key_returns_none() {
        let adapter = IniConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_string("strategy", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "kind"), None);
    }

    #[test]
    fn get_usize_value_and_default() {
        let adapter = IniConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_usize("rsi", "period", 14), 14);
        assert_eq!(adapter.get_usize("rsi", "missing", 42), 42);
    }

    #[test]
    fn get_usize_default_for_non_numeric() {
        let adapter = IniConfigAdapter::from_string("[rsi]\nperiod = abc\n").unwrap();
        assert_eq!(adapter.get_usize("rsi", "period", 14), 14);
    }

    #[test]
    fn get_f64_value_and_default() {
        let adapter = IniConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_f64("strategy", "order_size", 0.0), 0.01);
        assert_eq!(adapter.get_f64("strategy", "missing", 99.9), 99.9);
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();

        let adapter = IniConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_f64("rsi", "overbought", 0.0), 70.0);
    }

    #[test]
    fn from_file_fails_for_missing_file() {
        let result = IniConfigAdapter::from_file("/nonexistent/candlebot.ini");
        assert!(matches!(
            result,
            Err(CandlebotError::ConfigParse { .. })
        ));
    }
}
