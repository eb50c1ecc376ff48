//! Erros de configuração.
//!
//! Só a inicialização falha: listas de palavras, tabela de províncias e
//! arquivo de configuração são lidos antes do primeiro documento. O
//! processamento de um documento nunca retorna erro.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Arquivo de recurso ausente ou ilegível.
    #[error("falha ao ler {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Arquivo de configuração com JSON inválido.
    #[error("configuração inválida em {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Linha mal formada em uma tabela de recursos.
    #[error("{path}:{line}: {message}")]
    Malformed {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("padrão regex inválido: {0}")]
    Pattern(#[from] regex::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
