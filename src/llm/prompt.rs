//! Prompt construction for SQL generation.
//!
//! Builds the generation prompt with database schema context.

/// Prompt template for the SQL generator.
const PROMPT_TEMPLATE: &str = r#"You are an expert SQL query generator for SQLite databases.

DATABASE SCHEMA:
{schema}

TASK:
Convert the following natural language question into a valid SQLite SQL query.

QUESTION: {question}

REQUIREMENTS:
1. Generate ONLY executable SQL - no markdown code blocks, no explanations in the SQL
2. Use proper SQLite syntax and functions
3. Handle NULL values appropriately
4. Use meaningful aliases for readability, especially for aggregations
5. Follow these specific rules:
   - For date operations, use strftime() function
   - For string operations, use SQLite string functions (LIKE, ||, etc.)
   - Use explicit JOINs based on foreign key relationships
   - Always filter out cancelled orders when analyzing sales or revenue

OUTPUT FORMAT:
Generate the SQL query on the first line, followed by a blank line, then provide a brief explanation.

Example:
SELECT * FROM customers LIMIT 10;

This query retrieves the first 10 customer records from the customers table.

Now generate the SQL for the question above:"#;

/// Builds the generation prompt for a question against the given schema.
///
/// The schema text is embedded verbatim; it is never parsed or validated.
pub fn build_prompt(schema: &str, question: &str) -> String {
    PROMPT_TEMPLATE
        .replace("{schema}", schema)
        .replace("{question}", question)
}
