//! Market Android CLI
//!
//! Resolves the Android build configuration (version, release signing)
//! from the project's property files.

use anyhow::Result;
use clap::{Parser, Subcommand};
use market_android::{
    resolve_project, BuildConfig, BuildType, ProjectLayout, PropertySourceLoader, Signing,
    SigningConfig, SourceName,
};
use market_cli::logging::{self, LogConfig};
use market_cli::output::{format_count, Status};
use market_core::config::Config;
use market_core::error::{exit_codes, Error};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "market-android")]
#[command(about = "Resolve the Android build configuration for the market app")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Flutter project root
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved build configuration
    Resolve {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Build type whose signing configuration is shown
        #[arg(long, default_value = "release")]
        build_type: BuildType,
    },

    /// Check that the configuration resolves and report signing readiness
    Check {
        /// Fail unless a complete release signing configuration is present
        #[arg(long)]
        release: bool,
    },

    /// List property sources and the keys they provide
    Sources,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    logging::init(&LogConfig::from_verbosity(cli.verbose, cli.quiet))?;

    let config = match Config::load(cli.config.as_deref(), &cli.root) {
        Ok(config) => config,
        Err(e) => std::process::exit(report_error(&e, false)),
    };
    tracing::debug!(path = ?config.path, "Loaded project configuration");

    let exit_code = match cli.command {
        Commands::Resolve { json, build_type } => {
            run_resolve(&cli.root, &config, json, build_type)
        }
        Commands::Check { release } => {
            run_check(&cli.root, &config, release, cli.quiet)
        }
        Commands::Sources => {
            run_sources(&cli.root, &config)
        }
    };

    std::process::exit(exit_code);
}

fn report_error(err: &Error, json: bool) -> i32 {
    if json {
        match serde_json::to_string_pretty(&err.to_report()) {
            Ok(report) => println!("{}", report),
            Err(_) => Status::error(&err.to_string()),
        }
    } else {
        Status::error(&err.to_string());
    }
    err.exit_code()
}

fn resolve(root: &Path, config: &Config) -> std::result::Result<BuildConfig, Error> {
    resolve_project(root, &config.schema).map_err(Error::from)
}

fn run_resolve(root: &Path, config: &Config, json: bool, build_type: BuildType) -> i32 {
    let build = match resolve(root, config) {
        Ok(build) => build,
        Err(e) => return report_error(&e, json),
    };

    if json {
        return match serde_json::to_string_pretty(&build.variant(build_type)) {
            Ok(out) => {
                println!("{}", out);
                exit_codes::SUCCESS
            }
            Err(e) => report_error(&Error::from(e), true),
        };
    }

    print_build_config(&build, build_type);
    exit_codes::SUCCESS
}

fn print_build_config(build: &BuildConfig, build_type: BuildType) {
    let sdk = build.sdk();
    let metadata = build.dependency_metadata();

    Status::header("Build configuration");
    Status::field("applicationId", build.application_id());
    Status::field("namespace", build.namespace());
    Status::field("versionCode", &build.version_code().to_string());
    Status::field("versionName", build.version_name());
    Status::field("compileSdk", &sdk.compile.to_string());
    Status::field("minSdk", &sdk.min.to_string());
    Status::field("targetSdk", &sdk.target.to_string());
    Status::field("ndkVersion", build.ndk_version());
    Status::field("javaTarget", &build.java_target().to_string());
    Status::field(
        "depsMetadata",
        &format!(
            "apk={} bundle={}",
            metadata.include_in_apk, metadata.include_in_bundle
        ),
    );

    Status::subheader(&format!("Signing ({})", build_type));
    match (build_type, build.signing_config_for(build_type)) {
        (BuildType::Debug, _) => Status::field("key", "debug keystore"),
        (BuildType::Release, None) => Status::field("key", "none (unsigned)"),
        (BuildType::Release, Some(signing)) => print_signing(signing),
    }
}

fn print_signing(signing: &SigningConfig) {
    const NOT_SET: &str = "(not set)";

    Status::field("keyAlias", signing.key_alias.as_deref().unwrap_or(NOT_SET));
    Status::field(
        "keyPassword",
        &signing
            .key_password
            .as_ref()
            .map_or_else(|| NOT_SET.to_string(), ToString::to_string),
    );
    Status::field(
        "storeFile",
        &signing
            .store_file
            .as_ref()
            .map_or_else(|| NOT_SET.to_string(), |p| p.display().to_string()),
    );
    Status::field(
        "storePassword",
        &signing
            .store_password
            .as_ref()
            .map_or_else(|| NOT_SET.to_string(), ToString::to_string),
    );
}

fn run_check(root: &Path, config: &Config, release: bool, quiet: bool) -> i32 {
    let build = match resolve(root, config) {
        Ok(build) => build,
        Err(e) => return report_error(&e, false),
    };

    if !quiet {
        Status::success(&format!(
            "Resolved {} {} ({})",
            build.application_id(),
            build.version_name(),
            build.version_code()
        ));
    }

    // Warnings become failures only when a release build was requested
    let fail = |message: &str| {
        if release {
            Status::error(message);
            exit_codes::VALIDATION_ERROR
        } else {
            Status::warning(message);
            exit_codes::SUCCESS
        }
    };

    let keystore_path = PropertySourceLoader::from_config(&config.schema.sources).path_for(
        &ProjectLayout::from_schema(root, &config.schema).android_root,
        SourceName::Keystore,
    );

    match build.signing() {
        Signing::Unsigned => fail(&format!(
            "No signing configuration: {} not found, release build would be unsigned",
            keystore_path.display()
        )),
        Signing::Configured(signing) if !signing.is_complete() => fail(&format!(
            "Incomplete signing configuration in {}: missing {}",
            keystore_path.display(),
            signing.missing_fields().join(", ")
        )),
        Signing::Configured(signing) => match &signing.store_file {
            Some(store) if !store.is_file() => fail(&format!(
                "Keystore file does not exist: {}",
                store.display()
            )),
            _ => {
                if !quiet {
                    Status::success("Release signing configuration is complete");
                }
                exit_codes::SUCCESS
            }
        },
    }
}

fn run_sources(root: &Path, config: &Config) -> i32 {
    let layout = ProjectLayout::from_schema(root, &config.schema);
    let loader = PropertySourceLoader::from_config(&config.schema.sources);

    Status::header("Property sources");
    for name in SourceName::ALL {
        let path = loader.path_for(&layout.android_root, name);
        match loader.load(&layout.android_root, name) {
            Ok(Some(set)) => {
                Status::success(&format!(
                    "{}: {} ({})",
                    name,
                    path.display(),
                    format_count(set.len(), "key", "keys")
                ));
                for key in set.keys() {
                    println!("    {}", key);
                }
            }
            Ok(None) => Status::info(&format!("{}: {} (absent)", name, path.display())),
            Err(e) => return report_error(&Error::from(e), false),
        }
    }

    exit_codes::SUCCESS
}
