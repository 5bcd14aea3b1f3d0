// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde_json::json;

use rocm_variant_provider::utils::init_logging;
use rocm_variant_provider::{AmdVariantPlugin, ProviderConfig, VariantFeatureConfig};

/// Print the wheel variant features this host supports.
#[derive(Parser, Debug)]
#[command(name = "rocm-variant-provider", version, about)]
struct Cli {
    /// Emit JSON instead of `namespace :: feature :: values` lines
    #[arg(long)]
    json: bool,

    /// Print the raw detection result instead of variant features
    #[arg(long)]
    detect: bool,

    /// ROCm installation root (overrides ROCM_PATH)
    #[arg(long, value_name = "DIR")]
    rocm_path: Option<PathBuf>,
}

fn print_configs(namespace: &str, configs: &[VariantFeatureConfig]) {
    for config in configs {
        println!("{namespace} :: {} :: {:?}", config.name, config.values);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = ProviderConfig::from_env();
    init_logging(&config.log_level);
    if let Some(path) = cli.rocm_path {
        config.rocm_path = Some(path);
    }

    let plugin = AmdVariantPlugin::new(config);

    if cli.detect {
        let info = plugin.system_info();
        if cli.json {
            match serde_json::to_string_pretty(info) {
                Ok(text) => println!("{text}"),
                Err(e) => {
                    eprintln!("Error: {e}");
                    return ExitCode::FAILURE;
                }
            }
        } else {
            println!("{info:#?}");
        }
        return ExitCode::SUCCESS;
    }

    let all = plugin.get_all_configs();
    let supported = match plugin.get_supported_configs() {
        Ok(configs) => configs,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        let doc = json!({
            "namespace": plugin.namespace(),
            "all": all,
            "supported": supported,
        });
        match serde_json::to_string_pretty(&doc) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_configs(plugin.namespace(), &all);
        print_configs(plugin.namespace(), &supported);
    }

    ExitCode::SUCCESS
}
