// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Compiled contract artifacts.
//!
//! Artifacts follow the Hardhat layout: `<artifacts>/<source>/<Name>.json` holds the ABI and
//! creation bytecode, and the sibling `<Name>.dbg.json` points at the build info with the exact
//! compiler input used, which is what source verification needs.

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
    json_abi::JsonAbi,
    primitives::Bytes,
};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("io error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid artifact search pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("no artifact named {name} under {}", .dir.display())]
    NotFound { name: String, dir: PathBuf },
    #[error("several artifacts named {name}: {}", .paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", "))]
    Ambiguous { name: String, paths: Vec<PathBuf> },
    #[error("invalid constructor: {0}")]
    InvalidConstructor(String),
    #[error("constructor arguments could not be encoded: {0}")]
    Encoding(#[from] alloy::dyn_abi::Error),
}

/// Directory of compiled artifacts.
#[derive(Clone, Debug)]
pub struct Artifacts {
    dir: PathBuf,
}

impl Artifacts {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Finds the unique artifact for contract `name`.
    pub fn find(&self, name: &str) -> Result<Artifact, ArtifactError> {
        let pattern = self.dir.join("**").join(format!("{name}.json"));
        let paths: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())?
            .filter_map(Result::ok)
            .collect();
        match paths.as_slice() {
            [] => Err(ArtifactError::NotFound {
                name: name.to_owned(),
                dir: self.dir.clone(),
            }),
            [path] => Artifact::read(path),
            _ => Err(ArtifactError::Ambiguous {
                name: name.to_owned(),
                paths,
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    pub source_name: String,
    pub abi: JsonAbi,
    pub bytecode: Bytes,
    #[serde(skip)]
    path: PathBuf,
}

impl Artifact {
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let mut artifact: Self = read_json(path)?;
        artifact.path = path.to_owned();
        Ok(artifact)
    }

    /// Fully qualified name, e.g. `contracts/Raffle.sol:Raffle`.
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    /// ABI-encodes constructor arguments, checking them against the artifact's constructor.
    pub fn encode_constructor_args(&self, args: &[DynSolValue]) -> Result<Vec<u8>, ArtifactError> {
        let Some(constructor) = &self.abi.constructor else {
            if args.is_empty() {
                return Ok(Vec::new());
            }
            return Err(ArtifactError::InvalidConstructor(format!(
                "{} has no constructor but {} argument(s) were given",
                self.contract_name,
                args.len()
            )));
        };
        if constructor.inputs.len() != args.len() {
            return Err(ArtifactError::InvalidConstructor(format!(
                "mismatch number of constructor arguments (want {}; got {})",
                constructor.inputs.len(),
                args.len(),
            )));
        }
        Ok(constructor.abi_encode_input_raw(args)?)
    }

    /// Creation bytecode followed by the encoded constructor arguments.
    pub fn initcode(&self, args: &[DynSolValue]) -> Result<Bytes, ArtifactError> {
        let mut code = self.bytecode.to_vec();
        code.extend(self.encode_constructor_args(args)?);
        Ok(code.into())
    }

    /// Parses string-rendered constructor arguments using the constructor's parameter types.
    pub fn parse_constructor_args(&self, args: &[String]) -> Result<Vec<DynSolValue>, ArtifactError> {
        let inputs = self
            .abi
            .constructor
            .as_ref()
            .map(|constructor| constructor.inputs.as_slice())
            .unwrap_or_default();
        if inputs.len() != args.len() {
            return Err(ArtifactError::InvalidConstructor(format!(
                "mismatch number of constructor arguments (want {}; got {})",
                inputs.len(),
                args.len(),
            )));
        }
        let mut values = Vec::with_capacity(args.len());
        for (arg, param) in args.iter().zip(inputs) {
            let ty = param.resolve().map_err(|err| {
                ArtifactError::InvalidConstructor(format!("could not resolve {param}: {err}"))
            })?;
            let value = ty.coerce_str(arg).map_err(|err| {
                ArtifactError::InvalidConstructor(format!("could not parse {param}: {err}"))
            })?;
            values.push(value);
        }
        Ok(values)
    }

    /// Loads the build info referenced by the artifact's `.dbg.json` file.
    pub fn build_info(&self) -> Result<BuildInfo, ArtifactError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct DebugFile {
            build_info: PathBuf,
        }

        let dbg_path = self
            .path
            .with_file_name(format!("{}.dbg.json", self.contract_name));
        let dbg: DebugFile = read_json(&dbg_path)?;
        let base = dbg_path.parent().unwrap_or(Path::new("."));
        read_json(base.join(dbg.build_info))
    }
}

/// Compiler run that produced an artifact.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    /// e.g. `0.8.19+commit.7dd6d404`
    pub solc_long_version: String,
    /// Standard JSON compiler input.
    pub input: serde_json::Value,
}

fn read_json<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ArtifactError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ArtifactError::Json {
        path: path.to_owned(),
        source,
    })
}
