use crate::api::client::AhrefsClient;
use crate::api::condition::{Condition, ConditionSet, ConditionValue};
use crate::api::query::OrderBy;
use crate::api::reports::Report;
use crate::cli::main_types::{AuthCommands, ConfigCommands, ReportCommands};
use crate::core::auth::TokenInput;
use crate::core::services::{FetchParams, ReportService};
use crate::display::{OperationStatus, ProgressSpinner, TableDisplay, display_status};
use crate::error::{AppError, CliError, ConfigError};
use crate::storage::config::{Config, Profile};
use crate::storage::credentials::{Credentials, TokenSource};
use crate::utils::logging::print_verbose;
use crate::utils::validation;
use std::path::PathBuf;

/// Mask a token for display, keeping only the edges
fn mask_token(token: &str) -> String {
    if token.len() > 8 {
        format!("{}...{}", &token[..4], &token[token.len() - 4..])
    } else {
        "*****".to_string()
    }
}

/// Parse a 'column:OPERATOR:value' filter argument into a condition
fn parse_condition_arg(raw: &str) -> Result<Condition, AppError> {
    let mut parts = raw.splitn(3, ':');
    let (column, operator, value) = match (parts.next(), parts.next(), parts.next()) {
        (Some(column), Some(operator), Some(value)) => (column, operator, value),
        _ => {
            return Err(AppError::Cli(CliError::InvalidArguments(format!(
                "Invalid filter '{}'. Expected 'column:OPERATOR:value'",
                raw
            ))));
        }
    };

    Ok(Condition::parse(column, operator, infer_value(value))?)
}

/// Infer the value type of a filter argument from its text form
fn infer_value(raw: &str) -> ConditionValue {
    if let Ok(int) = raw.parse::<i64>() {
        ConditionValue::Int(int)
    } else if let Ok(float) = raw.parse::<f64>() {
        ConditionValue::Float(float)
    } else if raw.eq_ignore_ascii_case("true") {
        ConditionValue::Bool(true)
    } else if raw.eq_ignore_ascii_case("false") {
        ConditionValue::Bool(false)
    } else {
        ConditionValue::Text(raw.to_string())
    }
}

/// Collect repeated filter arguments into a condition set
fn parse_condition_set(args: &[String]) -> Result<Option<ConditionSet>, AppError> {
    if args.is_empty() {
        return Ok(None);
    }

    let mut conditions = Vec::with_capacity(args.len());
    for arg in args {
        conditions.push(parse_condition_arg(arg)?);
    }

    Ok(Some(ConditionSet::new(conditions)?))
}

#[derive(Default)]
pub struct AuthHandler;

impl AuthHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: AuthCommands,
        credentials: &Credentials,
        flag_token: Option<&str>,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            AuthCommands::Login => {
                print_verbose(verbose, "Attempting auth login command");

                let input = TokenInput::collect()?;
                input.validate()?;
                validation::validate_token(&input.token)?;

                Credentials::save_token_for_profile(&credentials.profile_name, &input.token)?;

                println!(
                    "✅ API token stored for profile: {}",
                    credentials.profile_name
                );
                Ok(())
            }
            AuthCommands::Logout => {
                print_verbose(verbose, "Attempting auth logout command");

                Credentials::clear_token_for_profile(&credentials.profile_name)?;
                println!(
                    "✅ Removed stored token for profile: {}",
                    credentials.profile_name
                );
                Ok(())
            }
            AuthCommands::Status => {
                print_verbose(verbose, "Attempting auth status command");

                println!("Authentication Status:");
                println!("=====================");

                match credentials.resolve_token(flag_token) {
                    Some((token, source)) => {
                        let source_name = match source {
                            TokenSource::Flag => "--token flag",
                            TokenSource::Environment => "AHR_TOKEN environment variable",
                            TokenSource::Keyring => "OS keyring",
                        };
                        println!("Token: {}", mask_token(&token));
                        println!("Source: {}", source_name);
                    }
                    None => {
                        println!("Token: (not set)");
                        println!("Use 'ahr-cli auth login' to store one.");
                    }
                }

                println!("\nActive Profile: {}", credentials.profile_name);
                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub struct ConfigHandler;

impl ConfigHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: ConfigCommands,
        config: &mut Config,
        config_path: Option<PathBuf>,
        profile_name: &str,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                print_verbose(verbose, "Attempting config show command");

                println!("Current Configuration:");
                println!("=====================");

                if let Some(default_profile) = &config.default_profile {
                    println!("Default Profile: {}", default_profile);
                } else {
                    println!("Default Profile: (not set)");
                }

                println!("\nProfiles:");
                if config.profiles.is_empty() {
                    println!("  No profiles configured");
                } else {
                    for (name, profile) in &config.profiles {
                        println!("  [{}]", name);
                        if let Some(api_url) = &profile.api_url {
                            println!("    API URL: {}", api_url);
                        }
                        if let Some(mode) = &profile.default_mode {
                            println!("    Default Mode: {}", mode);
                        }
                        if let Some(limit) = profile.default_limit {
                            println!("    Default Limit: {} rows", limit);
                        }
                    }
                }

                Ok(())
            }
            ConfigCommands::Set { field, value } => {
                print_verbose(
                    verbose,
                    &format!("Attempting config set - field: {}, value: {}", field, value),
                );

                let mut profile = config.get_profile(profile_name).cloned().unwrap_or_default();

                match field.as_str() {
                    "api_url" => {
                        validation::validate_url(&value)?;
                        profile.api_url = Some(value.clone());
                    }
                    "default_mode" => {
                        value.parse::<crate::api::query::Mode>().map_err(|_| {
                            AppError::Config(ConfigError::InvalidValue {
                                field: field.clone(),
                                value: value.clone(),
                                reason: "expected one of: exact, domain, subdomains, prefix"
                                    .to_string(),
                            })
                        })?;
                        profile.default_mode = Some(value.clone());
                    }
                    "default_limit" => {
                        let limit = value.parse::<u32>().ok().filter(|n| *n > 0).ok_or_else(
                            || {
                                AppError::Config(ConfigError::InvalidValue {
                                    field: field.clone(),
                                    value: value.clone(),
                                    reason: "expected a positive integer".to_string(),
                                })
                            },
                        )?;
                        profile.default_limit = Some(limit);
                    }
                    _ => {
                        return Err(AppError::Cli(CliError::InvalidArguments(format!(
                            "Invalid field: {}. Use 'api_url', 'default_mode' or 'default_limit'",
                            field
                        ))));
                    }
                }

                config.set_profile(profile_name.to_string(), profile);
                config.save(config_path)?;

                println!("✅ Set profile '{}' {} to: {}", profile_name, field, value);
                println!("Configuration saved successfully.");
                Ok(())
            }
        }
    }
}

#[derive(Default)]
pub struct ReportHandler;

impl ReportHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: ReportCommands,
        profile: &Profile,
        token: Option<(String, TokenSource)>,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            ReportCommands::List => {
                print_verbose(verbose, "Attempting report list command");

                let display =
                    TableDisplay::new().with_colors(atty::is(atty::Stream::Stdout));
                let rendered = display.render_report_list(&Report::ALL)?;
                println!("{}", rendered);
                Ok(())
            }
            ReportCommands::Fetch {
                report,
                target,
                mode,
                limit,
                select,
                order_by,
                r#where,
                having,
                format,
                dry_run,
            } => {
                print_verbose(
                    verbose,
                    &format!(
                        "Attempting report fetch command - Report: {}, Target: {}, Mode: {:?}, Limit: {:?}, Format: {}",
                        report, target, mode, limit, format
                    ),
                );

                let report: Report = report.parse()?;

                let mut params = FetchParams::new(target.clone());
                if let Some(mode) = mode.as_deref().or(profile.default_mode.as_deref()) {
                    params.mode = mode.parse()?;
                }
                if let Some(limit) = limit.or(profile.default_limit) {
                    params.limit = limit;
                }
                if let Some(select) = select {
                    params.metrics = Some(
                        select
                            .split(',')
                            .map(|column| column.trim().to_string())
                            .collect(),
                    );
                }
                if let Some(order_by) = order_by {
                    params.order_by = Some(OrderBy::parse(&order_by)?);
                }
                params.where_filter = parse_condition_set(&r#where)?;
                params.having_filter = parse_condition_set(&having)?;

                let base_url = profile
                    .api_url
                    .as_deref()
                    .unwrap_or(crate::api::client::DEFAULT_BASE_URL);

                if dry_run {
                    // No request leaves the machine; the token is masked in the output
                    let client = AhrefsClient::with_base_url(base_url, "***")?;
                    let url = ReportService::new(client).build_url(report, params)?;
                    println!("{}", url);
                    return Ok(());
                }

                let (token, source) = token.ok_or_else(|| {
                    AppError::Cli(CliError::AuthRequired {
                        message: "No API token found".to_string(),
                        hint: "Run 'ahr-cli auth login' or set AHR_TOKEN".to_string(),
                    })
                })?;
                match source {
                    TokenSource::Flag => print_verbose(verbose, "Using token from --token flag"),
                    TokenSource::Environment => {
                        print_verbose(verbose, "Using token from AHR_TOKEN environment variable")
                    }
                    TokenSource::Keyring => print_verbose(verbose, "Using token from OS keyring"),
                }

                let client = AhrefsClient::with_base_url(base_url, token)?;
                let service = ReportService::new(client);

                // Show progress while the report downloads
                let mut spinner =
                    ProgressSpinner::new(format!("Fetching {} for {}...", report.name(), target));
                spinner.start();

                let result = match service.fetch(report, params).await {
                    Ok(result) => {
                        spinner.stop(Some("✅ Report fetched"));
                        result
                    }
                    Err(e) => {
                        spinner.stop(None);
                        println!("❌ Fetch failed: {}", e);
                        return Err(e);
                    }
                };

                let display =
                    TableDisplay::new().with_colors(atty::is(atty::Stream::Stdout));

                match format.as_str() {
                    "json" => match serde_json::to_string_pretty(&result) {
                        Ok(json_output) => println!("{}", json_output),
                        Err(e) => {
                            return Err(AppError::Cli(CliError::InvalidArguments(format!(
                                "Failed to serialize result to JSON: {}",
                                e
                            ))));
                        }
                    },
                    "csv" => {
                        print_verbose(verbose, "Rendering CSV output");
                        print!("{}", display.to_csv(&result));
                    }
                    _ => {
                        // Table output (default)
                        if result.is_empty() {
                            display_status("Report fetch", OperationStatus::Warning);
                            println!("No rows matched the request.");
                        } else {
                            display_status(
                                &format!("Retrieved {} rows", result.row_count()),
                                OperationStatus::Success,
                            );
                            let rendered = display.render_result(&result)?;
                            println!("{}", rendered);
                        }
                    }
                }

                Ok(())
            }
        }
    }
}
