// Copyright 2025 Fernando Borretti
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

use clap::Parser;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::store::FileStore;
use crate::web::server::start_server;

/// Default store file, relative to the working directory.
const DEFAULT_STORE: &str = "kotoba.json";

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Serve the web interface.
    Serve {
        /// Optional path to the vocabulary file.
        file: Option<String>,
        /// Port to bind.
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
    /// Print the list collection as pretty-printed JSON.
    Export {
        /// Optional path to the vocabulary file.
        file: Option<String>,
    },
    /// Import lists from an exported JSON file.
    Import {
        /// Path to the JSON file to import.
        input: String,
        /// Optional path to the vocabulary file.
        file: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve { file, port } => {
            let path = store_path(file);
            start_server(path, port).await
        }
        Command::Export { file } => {
            let store = FileStore::new(store_path(file));
            let coll = Collection::open(Box::new(store))?;
            let json = coll.export_json()?;
            println!("{json}");
            Ok(())
        }
        Command::Import { input, file } => {
            let store = FileStore::new(store_path(file));
            let mut coll = Collection::open(Box::new(store))?;
            let payload = std::fs::read_to_string(input)?;
            let count = coll.import(&payload)?;
            println!("Imported {count} lists.");
            Ok(())
        }
    }
}

fn store_path(file: Option<String>) -> PathBuf {
    match file {
        Some(file) => PathBuf::from(file),
        None => PathBuf::from(DEFAULT_STORE),
    }
}
