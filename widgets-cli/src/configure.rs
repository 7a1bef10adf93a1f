use anyhow::Result;
use inquire::{Confirm, CustomType, CustomUserError, Password, Text, validator::Validation};
use widgets_core::{Config, Coordinates};

/// Interactive setup; writes the result to the config file.
pub fn run() -> Result<()> {
    let mut config = Config::load()?;

    let key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_help_message(if config.api_key.is_some() {
            "leave empty to keep the current key"
        } else {
            "get one at https://openweathermap.org/api"
        })
        .prompt()?;
    if !key.trim().is_empty() {
        config.api_key = Some(key.trim().to_string());
    }

    let default_city = config.default_city.clone();
    let city = Text::new("Default city:").with_default(&default_city).prompt()?;
    if !city.trim().is_empty() {
        config.default_city = city.trim().to_string();
    }

    config.share_location = Confirm::new("Allow \"use my location\" lookups?")
        .with_default(config.share_location)
        .prompt()?;

    if config.share_location
        && Confirm::new("Set home coordinates?")
            .with_default(config.home.is_none())
            .prompt()?
    {
        let lat = CustomType::<f64>::new("Latitude:")
            .with_validator(validate_latitude)
            .prompt()?;
        let lon = CustomType::<f64>::new("Longitude:")
            .with_validator(validate_longitude)
            .prompt()?;
        config.home = Some(Coordinates { lat, lon });
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn validate_latitude(value: &f64) -> Result<Validation, CustomUserError> {
    Ok(range_check(*value, 90.0))
}

fn validate_longitude(value: &f64) -> Result<Validation, CustomUserError> {
    Ok(range_check(*value, 180.0))
}

fn range_check(value: f64, limit: f64) -> Validation {
    if (-limit..=limit).contains(&value) {
        Validation::Valid
    } else {
        Validation::Invalid(format!("must be between -{limit} and {limit}").into())
    }
}
