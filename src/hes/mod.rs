use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};
use regex::Regex;

use crate::model::{
    HesParseOutput, HomeProfile, NOT_AVAILABLE, ParseDebug, Section, SuggestionRow,
};

mod anchors;
mod extract;
mod fallback;
mod fields;
mod logger;
mod normalize;
mod pipeline;
mod profile;
mod sections;
mod split;
mod template;
#[cfg(test)]
mod tests;

pub use extract::{PdftotextExtractor, TextExtractor};
pub use logger::{NoopLogger, ParseLogger, TracingLogger};
pub use pipeline::HesReportParser;
pub use template::{CATALOG_VERSION, template_rows};

use anchors::*;
use extract::*;
use fallback::*;
use fields::*;
use normalize::*;
use profile::*;
use sections::*;
use split::*;
use template::*;
