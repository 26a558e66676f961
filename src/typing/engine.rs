//! `.d.ts` declaration engine.

use async_trait::async_trait;
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use super::tokens::{camel_case, extract_classes};
use super::{Declaration, DeclarationEngine, GeneratedArtifact};
use crate::config::Settings;
use crate::error::{TypingError, TypingResult};

/// Output options for [`DtsEngine`].
#[derive(Debug, Clone, Default)]
pub struct DtsOptions {
    pub search_dir: PathBuf,
    pub out_dir: Option<PathBuf>,
    pub camel_case: bool,
    pub drop_extension: bool,
    pub banner: Option<String>,
}

impl DtsOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            search_dir: settings.search_dir.clone(),
            out_dir: settings.out_dir.clone(),
            camel_case: settings.camel_case,
            drop_extension: settings.drop_extension,
            banner: settings.banner.clone(),
        }
    }
}

#[derive(Debug, Clone)]
struct CachedTokens {
    digest: [u8; 32],
    tokens: Vec<String>,
    warnings: Vec<String>,
}

/// Writes `declare const styles: { ... }; export = styles;` files.
#[derive(Debug, Default)]
pub struct DtsEngine {
    options: DtsOptions,
    cache: DashMap<PathBuf, CachedTokens>,
}

impl DtsEngine {
    pub fn new(options: DtsOptions) -> Self {
        Self {
            options,
            cache: DashMap::new(),
        }
    }

    /// Where the declaration for `source` is written.
    pub fn output_path(&self, source: &Path) -> TypingResult<PathBuf> {
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| TypingError::Generate {
                path: source.to_path_buf(),
                reason: "path has no file name".to_string(),
            })?;
        let file_name = if self.options.drop_extension {
            source
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or(file_name)
        } else {
            file_name
        };
        let file_name = format!("{file_name}.d.ts");

        Ok(match &self.options.out_dir {
            Some(out_dir) => {
                let relative = self.relative_to_search_dir(source)?;
                let parent = relative.parent().unwrap_or(Path::new(""));
                out_dir.join(parent).join(file_name)
            }
            None => source.with_file_name(file_name),
        })
    }

    /// `source` relative to the search directory.
    ///
    /// Batch sources share the search directory's spelling; watch sources
    /// arrive canonical and absolute, so both sides are canonicalized when
    /// the plain prefix does not match.
    fn relative_to_search_dir(&self, source: &Path) -> TypingResult<PathBuf> {
        let search_dir = &self.options.search_dir;
        if let Ok(relative) = source.strip_prefix(search_dir) {
            return Ok(relative.to_path_buf());
        }

        canonical(search_dir)
            .zip(canonical(source))
            .and_then(|(root, source)| source.strip_prefix(root).ok().map(Path::to_path_buf))
            .ok_or_else(|| TypingError::Generate {
                path: source.to_path_buf(),
                reason: format!("not inside search directory {}", search_dir.display()),
            })
    }

    /// Convert raw classes to exported tokens, collecting collision warnings.
    fn tokens_for(&self, css: &str) -> (Vec<String>, Vec<String>) {
        let classes = extract_classes(css);
        if !self.options.camel_case {
            return (classes, Vec::new());
        }

        let mut tokens = Vec::with_capacity(classes.len());
        let mut origin: HashMap<String, String> = HashMap::new();
        let mut warnings = Vec::new();
        for class in classes {
            let token = camel_case(&class);
            match origin.get(&token) {
                Some(first) => warnings.push(format!(
                    "class \"{class}\" collides with \"{first}\" as \"{token}\"; keeping \"{first}\""
                )),
                None => {
                    origin.insert(token.clone(), class);
                    tokens.push(token);
                }
            }
        }
        (tokens, warnings)
    }

    fn render(&self, tokens: &[String]) -> String {
        let mut out = String::new();
        if let Some(banner) = &self.options.banner {
            let _ = writeln!(out, "{banner}");
        }
        out.push_str("declare const styles: {\n");
        for token in tokens {
            let _ = writeln!(out, "  readonly \"{token}\": string;");
        }
        out.push_str("};\nexport = styles;\n");
        out
    }
}

/// Canonical form of `path`; a missing file is resolved through its parent.
fn canonical(path: &Path) -> Option<PathBuf> {
    if let Ok(resolved) = path.canonicalize() {
        return Some(resolved);
    }
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Some(parent.canonicalize().ok()?.join(path.file_name()?))
}

#[async_trait]
impl DeclarationEngine for DtsEngine {
    async fn create(&self, path: &Path, css: &str, use_cache: bool) -> TypingResult<Declaration> {
        let digest: [u8; 32] = Sha256::digest(css.as_bytes()).into();

        let cached = use_cache
            .then(|| self.cache.get(path))
            .flatten()
            .filter(|entry| entry.digest == digest)
            .map(|entry| (entry.tokens.clone(), entry.warnings.clone()));

        let (tokens, warnings) = match cached {
            Some(hit) => {
                crate::debug_event!("engine", "cache hit", "{}", path.display());
                hit
            }
            None => {
                let fresh = self.tokens_for(css);
                if use_cache {
                    self.cache.insert(
                        path.to_path_buf(),
                        CachedTokens {
                            digest,
                            tokens: fresh.0.clone(),
                            warnings: fresh.1.clone(),
                        },
                    );
                }
                fresh
            }
        };

        Ok(Declaration {
            source: path.to_path_buf(),
            output_path: self.output_path(path)?,
            tokens,
            warnings,
        })
    }

    async fn write(&self, declaration: Declaration) -> TypingResult<GeneratedArtifact> {
        let contents = self.render(&declaration.tokens);
        let output_path = declaration.output_path;

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|source| TypingError::Write {
                        path: parent.to_path_buf(),
                        source,
                    })?;
            }
        }
        tokio::fs::write(&output_path, contents)
            .await
            .map_err(|source| TypingError::Write {
                path: output_path.clone(),
                source,
            })?;

        Ok(GeneratedArtifact {
            output_path,
            warnings: declaration.warnings,
        })
    }
}
