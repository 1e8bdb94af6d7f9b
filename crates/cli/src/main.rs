// Copyright 2025 itscheems
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

mod config;
mod logging;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use zypline_sdk::{
	ApiResponse, Client, Credentials, Format, PairUpload, ParamSet, RequestSigner,
};

use crate::config::CliConfig;

#[derive(Parser, Debug)]
#[command(name = "zypline")]
#[command(about = "Index lookup and verification client for the Zypline service", long_about = None)]
#[command(version)]
struct Cli {
	/// Configuration file (TOML, YAML or JSON); ZYPLINE_* environment variables override it
	#[arg(short, long, global = true)]
	config: Option<PathBuf>,

	/// Response format to request (json or xml)
	#[arg(long, global = true)]
	format: Option<Format>,

	/// Print the raw response body instead of the decoded record
	#[arg(long, global = true)]
	raw: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Look up the destination paired with an index
	Lookup {
		#[arg(long)]
		index: String,
	},
	/// Pair an index with a destination file
	AddPair {
		#[arg(long)]
		index: String,
		/// Session token obtained through verification
		#[arg(long)]
		token: String,
		/// File to upload as the destination
		#[arg(long)]
		file: PathBuf,
		#[arg(long, default_value = "application/octet-stream")]
		content_type: String,
	},
	/// Remove the pair registered for an index
	DeletePair {
		#[arg(long)]
		index: String,
		#[arg(long)]
		token: String,
	},
	/// Check whether a session token is still valid
	CheckToken {
		#[arg(long)]
		index: String,
		#[arg(long)]
		token: String,
		#[arg(long)]
		ip: Option<String>,
	},
	/// Ask the service to send a verification code to an index
	RequestVerification {
		#[arg(long)]
		index: String,
		#[arg(long)]
		ip: Option<String>,
	},
	/// Submit a verification code
	AttemptVerification {
		#[arg(long)]
		index: String,
		#[arg(long)]
		code: String,
		#[arg(long)]
		ip: Option<String>,
	},
	/// Print the signed parameters for a request without sending it
	Sign {
		/// Request parameter as key=value (repeatable)
		#[arg(long = "param", value_parser = parse_key_val)]
		params: Vec<(String, String)>,
	},
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
	let (key, value) = s
		.split_once('=')
		.ok_or_else(|| format!("invalid key=value: no '=' found in '{}'", s))?;
	if key.is_empty() {
		return Err(format!("invalid key=value: empty key in '{}'", s));
	}
	Ok((key.to_string(), value.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();

	logging::init_logging()?;

	let mut config = CliConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
	if let Some(format) = cli.format {
		config.format = format;
	}

	if let Err(e) = run(cli.command, cli.raw, &config).await {
		error!("Command failed: {:#}", e);
		return Err(e);
	}

	Ok(())
}

async fn run(command: Command, raw: bool, config: &CliConfig) -> Result<()> {
	let client = || {
		Client::with_config(
			config.api_id.clone(),
			config.api_key.clone(),
			config.client_config(),
		)
		.context("Failed to create client")
	};

	let response = match command {
		Command::Sign { params } => return sign(params, config),
		Command::Lookup { index } => client()?.get_destination(&index).await?,
		Command::AddPair {
			index,
			token,
			file,
			content_type,
		} => {
			let upload = PairUpload::from_path(&file, content_type)
				.with_context(|| format!("Failed to read {}", file.display()))?;
			client()?.add_pair(&index, &token, upload).await?
		}
		Command::DeletePair { index, token } => client()?.delete_pair(&index, &token).await?,
		Command::CheckToken { index, token, ip } => {
			client()?.check_token(&index, &token, ip.as_deref()).await?
		}
		Command::RequestVerification { index, ip } => {
			client()?
				.request_verification(&index, ip.as_deref())
				.await?
		}
		Command::AttemptVerification { index, code, ip } => {
			client()?
				.attempt_verification(&index, &code, ip.as_deref())
				.await?
		}
	};

	print_response(&response, raw)
}

fn sign(params: Vec<(String, String)>, config: &CliConfig) -> Result<()> {
	let output = signed_output(params, config)?;
	println!("{}", serde_json::to_string_pretty(&output)?);
	Ok(())
}

fn signed_output(params: Vec<(String, String)>, config: &CliConfig) -> Result<serde_json::Value> {
	let credentials = Credentials::new(config.api_id.clone(), config.api_key.clone())?;
	let signer = RequestSigner::new(credentials, config.signature_order);

	let params: ParamSet = params.into_iter().collect();
	let preimage = signer.preimage(&params);
	let signed = signer.sign(params)?;
	info!(hash = signed.hash(), "Signed {} parameters", signed.params().len());

	Ok(serde_json::json!({
		"signing_string": preimage,
		"hash": signed.hash(),
		"params": signed.pairs(),
	}))
}

fn print_response(response: &ApiResponse, raw: bool) -> Result<()> {
	if raw {
		let mut stdout = std::io::stdout().lock();
		stdout.write_all(&response.raw)?;
		stdout.write_all(b"\n")?;
		return Ok(());
	}

	println!("{}", serde_json::to_string_pretty(&response.record)?);
	Ok(())
}
