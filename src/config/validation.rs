use super::schema::Config;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.cohort_size == Some(0) {
        errors.push("cohort_size: must be at least 1".to_string());
    }

    if let Some(bonus) = config.bonus_max {
        if !bonus.is_finite() || bonus < 0.0 {
            errors.push("bonus_max: must be a non-negative number".to_string());
        }
    }

    if let Some(ref maxima) = config.criterion_maxima {
        if maxima.is_empty() {
            errors.push("criterion_maxima: at least one maximum is required".to_string());
        }
        for (i, max) in maxima.iter().enumerate() {
            if *max == 0 {
                errors.push(format!("criterion_maxima[{}]: must be positive", i));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
