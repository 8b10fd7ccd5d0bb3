//! # Generation Task Prompts
//!
//! Default system and user prompts for each output target. User prompts use
//! the slots defined in [`super::core::Slot`].

/// System prompt for plain SQL generation.
pub const SQL_SYSTEM_PROMPT: &str = "Você é um assistente SQL útil que converte perguntas em português para gerar um script SQL para utilizar em Postgres no PGAdmin.";

/// User prompt for plain SQL generation.
///
/// Placeholders: `{schema}`, `{columns}`, `{namespace}`, `{question}`
pub const SQL_USER_PROMPT: &str = r#"Sua tarefa é gerar a query considerando o seguinte schema do banco de dados PostgreSQL:

{schema}

O usuário selecionou as seguintes colunas para exibir na consulta:
{columns}

Considere que as tabelas estão no schema SQL chamado "{namespace}". Use esse schema ao referenciar as tabelas (ex: {namespace}.tabela).

Com base nesse schema e nessas colunas, escreva uma consulta SQL (sem explicações) para responder à pergunta abaixo.
Importante: nunca use apelidos ou alias para os nomes das tabelas.

Pergunta: {question}
SQL:"#;

/// System prompt for SQLAlchemy code generation.
pub const SQLALCHEMY_SYSTEM_PROMPT: &str = "Você é um assistente SQL útil que converte perguntas em português para gerar um script utilizando sqlalchemy.";

/// User prompt for SQLAlchemy code generation.
///
/// Placeholders: `{schema}`, `{columns}`, `{namespace}`, `{question}`
pub const SQLALCHEMY_USER_PROMPT: &str = r#"Sua tarefa é gerar a query considerando o seguinte schema do banco de dados PostgreSQL:

{schema}

O usuário selecionou as seguintes colunas para exibir na consulta:
{columns}

Considere que as tabelas estão no schema SQL chamado "{namespace}". Use esse schema ao referenciar as tabelas (ex: {namespace}.tabela).

Com base nesse schema e nessas colunas, escreva uma função em Python utilizando SQLAlchemy versão 1.4 (sem explicações) para responder à pergunta abaixo.
Importante: nunca use apelidos ou alias para os nomes das tabelas.

Pergunta: {question}
SQL:"#;
