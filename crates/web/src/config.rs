use std::path::PathBuf;

use academy::AttendanceBasis;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "academy-api")]
#[command(about = "Belt progression and class attendance API", long_about = None)]
#[command(version)]
pub struct Config {
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// JSON file with students, classes, check-ins and promotions to preload
    #[arg(long, env = "SEED_FILE")]
    pub seed_file: Option<PathBuf>,

    /// Denominator of attendance percentages: `capacity` or `enrolled`
    #[arg(long, env = "ATTENDANCE_BASIS", default_value = "capacity")]
    pub attendance_basis: AttendanceBasis,
}

impl Config {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let config = Config::try_parse_from([
            "academy-api",
            "--host",
            "0.0.0.0",
            "--port",
            "9000",
            "--attendance-basis",
            "enrolled",
        ])
        .unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.attendance_basis, AttendanceBasis::Enrolled);
        assert!(config.seed_file.is_none());
    }

    #[test]
    fn test_rejects_unknown_basis() {
        let result =
            Config::try_parse_from(["academy-api", "--attendance-basis", "headcount"]);
        assert!(result.is_err());
    }
}
