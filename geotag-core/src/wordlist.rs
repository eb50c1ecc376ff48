//! # Listas de Palavras e Tabelas de Recursos
//!
//! Recursos estáticos usados pelas regras:
//!
//! - listas de nomes, títulos e sufixos de pessoas (filtro de nomes de pessoa);
//! - tabela de nomes de províncias (`PAÍS.ADMIN1<TAB>Nome`).
//!
//! ## Formato das listas
//!
//! Uma entrada por linha. Linhas vazias e linhas iniciadas por `#` são
//! ignoradas. Entradas são guardadas em minúsculas.
//!
//! Os recursos padrão são embutidos no binário; versões em arquivo podem
//! substituí-los via [`GeotagConfig`](crate::config::GeotagConfig).

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};

const BUILTIN_PERSON_NAMES: &str = include_str!("../resources/filters/person-name-filter.txt");
const BUILTIN_PERSON_TITLES: &str = include_str!("../resources/filters/person-title-filter.txt");
const BUILTIN_PERSON_SUFFIXES: &str = include_str!("../resources/filters/person-suffix-filter.txt");
const BUILTIN_PROVINCE_NAMES: &str = include_str!("../resources/province-names.tsv");

/// Interpreta o conteúdo de uma lista de palavras.
pub fn parse_word_list(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}

/// Lê uma lista de palavras do disco. Arquivo ausente é erro.
pub fn load_word_list(path: &Path) -> ConfigResult<HashSet<String>> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_word_list(&content))
}

/// As três listas do filtro de nomes de pessoa.
#[derive(Debug, Clone, Default)]
pub struct PersonNameLists {
    pub names: HashSet<String>,
    pub titles: HashSet<String>,
    pub suffixes: HashSet<String>,
}

impl PersonNameLists {
    /// Listas embutidas no crate.
    pub fn builtin() -> Self {
        Self {
            names: parse_word_list(BUILTIN_PERSON_NAMES),
            titles: parse_word_list(BUILTIN_PERSON_TITLES),
            suffixes: parse_word_list(BUILTIN_PERSON_SUFFIXES),
        }
    }

    pub fn load(names: &Path, titles: &Path, suffixes: &Path) -> ConfigResult<Self> {
        Ok(Self {
            names: load_word_list(names)?,
            titles: load_word_list(titles)?,
            suffixes: load_word_list(suffixes)?,
        })
    }
}

/// Tabela `PAÍS.ADMIN1` → nome da província.
#[derive(Debug, Clone, Default)]
pub struct ProvinceNames {
    names: HashMap<String, String>,
}

impl ProvinceNames {
    pub fn builtin() -> Self {
        // A tabela embutida é validada pelos testes; linhas inválidas são ignoradas
        let mut table = Self::default();
        for line in BUILTIN_PROVINCE_NAMES.lines() {
            if let Some((key, name)) = parse_province_line(line) {
                table.insert(key, name);
            }
        }
        table
    }

    /// Lê uma tabela TSV. Uma linha sem tabulação é erro.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut table = Self::default();
        for (i, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match parse_province_line(line) {
                Some((key, name)) => table.insert(key, name),
                None => {
                    return Err(ConfigError::Malformed {
                        path: path.to_path_buf(),
                        line: i + 1,
                        message: format!("esperado 'PAÍS.ADMIN1<TAB>Nome', encontrado {:?}", trimmed),
                    })
                }
            }
        }
        tracing::debug!(path = %path.display(), entries = table.len(), "tabela de províncias carregada");
        Ok(table)
    }

    pub fn insert(&mut self, key: impl Into<String>, name: impl Into<String>) {
        self.names.insert(key.into(), name.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.names.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn parse_province_line(line: &str) -> Option<(String, String)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let (key, name) = trimmed.split_once('\t')?;
    let (key, name) = (key.trim(), name.trim());
    if key.is_empty() || name.is_empty() || !key.contains('.') {
        return None;
    }
    Some((key.to_string(), name.to_string()))
}
