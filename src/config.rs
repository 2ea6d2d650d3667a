use dotenvy::dotenv;
use std::env;

/// Payroll policy constants. These were hardcoded literals scattered through
/// the legacy calculation; they are named here and passed explicitly into the
/// salary and leave calculators so a policy change is a config edit.
#[derive(Debug, Clone, Copy)]
pub struct PayrollPolicy {
    /// Dearness Allowance as % of basic pay when the staff row has no override.
    pub default_da_percentage: f64,
    /// House Rent Allowance as % of basic pay when the staff row has no override.
    pub default_hra_percentage: f64,
    /// Divisor for per-day attendance deduction. Fixed at 30 by board policy,
    /// regardless of the actual number of days in the month.
    pub attendance_month_divisor: f64,
    /// Provident Fund contribution rate on basic pay.
    pub pf_rate: f64,
    /// ESI rate on gross salary, applied only up to the ceiling.
    pub esi_rate: f64,
    /// Gross salary at or below which ESI applies.
    pub esi_gross_ceiling: f64,
    /// Flat professional tax charged above the threshold.
    pub professional_tax: f64,
    /// Gross salary above which professional tax applies.
    pub professional_tax_threshold: f64,
    /// Maximum leave days carried forward into a new year.
    pub carry_forward_cap: i64,
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self {
            default_da_percentage: 42.0,
            default_hra_percentage: 24.0,
            attendance_month_divisor: 30.0,
            pf_rate: 0.12,
            esi_rate: 0.0175,
            esi_gross_ceiling: 25_000.0,
            professional_tax: 200.0,
            professional_tax_threshold: 10_000.0,
            carry_forward_cap: 30,
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub access_token_ttl: usize,
    pub refresh_token_ttl: usize,

    // Rate limiting
    pub rate_login_per_min: u32,
    pub rate_register_per_min: u32,
    pub rate_refresh_per_min: u32,
    pub rate_protected_per_min: u32,

    pub api_prefix: String,

    pub policy: PayrollPolicy,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = PayrollPolicy::default();
        let policy = PayrollPolicy {
            default_da_percentage: env_or("DA_PERCENTAGE", defaults.default_da_percentage),
            default_hra_percentage: env_or("HRA_PERCENTAGE", defaults.default_hra_percentage),
            attendance_month_divisor: env_or(
                "ATTENDANCE_MONTH_DIVISOR",
                defaults.attendance_month_divisor,
            ),
            pf_rate: env_or("PF_RATE", defaults.pf_rate),
            esi_rate: env_or("ESI_RATE", defaults.esi_rate),
            esi_gross_ceiling: env_or("ESI_GROSS_CEILING", defaults.esi_gross_ceiling),
            professional_tax: env_or("PROFESSIONAL_TAX", defaults.professional_tax),
            professional_tax_threshold: env_or(
                "PROFESSIONAL_TAX_THRESHOLD",
                defaults.professional_tax_threshold,
            ),
            carry_forward_cap: env_or("CARRY_FORWARD_CAP", defaults.carry_forward_cap),
        };

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            access_token_ttl: env_or("ACCESS_TOKEN_TTL", 900), // 15 min
            refresh_token_ttl: env_or("REFRESH_TOKEN_TTL", 604_800), // 7 days

            rate_login_per_min: env_or("RATE_LOGIN_PER_MIN", 60),
            rate_register_per_min: env_or("RATE_REGISTER_PER_MIN", 30),
            rate_refresh_per_min: env_or("RATE_REFRESH_PER_MIN", 30),
            rate_protected_per_min: env_or("RATE_PROTECTED_PER_MIN", 1000),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".to_string()),

            policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_defaults_match_board_rules() {
        let p = PayrollPolicy::default();
        assert_eq!(p.default_da_percentage, 42.0);
        assert_eq!(p.default_hra_percentage, 24.0);
        assert_eq!(p.attendance_month_divisor, 30.0);
        assert_eq!(p.pf_rate, 0.12);
        assert_eq!(p.esi_rate, 0.0175);
        assert_eq!(p.esi_gross_ceiling, 25_000.0);
        assert_eq!(p.professional_tax, 200.0);
        assert_eq!(p.professional_tax_threshold, 10_000.0);
        assert_eq!(p.carry_forward_cap, 30);
    }
}
