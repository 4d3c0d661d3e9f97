//! Mock LLM clients for testing.
//!
//! Provides deterministic responses based on input patterns, plus a client
//! that always fails for exercising generation-error paths.

use async_trait::async_trait;

use crate::error::{AskdbError, Result};
use crate::llm::LlmClient;

/// Mock LLM client that returns canned responses based on input patterns.
///
/// Used for unit testing without making real API calls. Responses follow the
/// "SQL, blank line, explanation" format the prompt asks for.
#[derive(Debug, Clone, Default)]
pub struct MockLlmClient {
    /// Custom response mappings (pattern -> response).
    custom_responses: Vec<(String, String)>,
}

impl MockLlmClient {
    /// Creates a new mock client with default responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a custom response mapping.
    ///
    /// When the prompt contains `pattern`, the mock will return `response`.
    pub fn with_response(
        mut self,
        pattern: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        self.custom_responses
            .push((pattern.into(), response.into()));
        self
    }

    /// Generates a mock response based on the input.
    fn mock_response(&self, input: &str) -> String {
        let input_lower = input.to_lowercase();

        // Check custom responses first
        for (pattern, response) in &self.custom_responses {
            if input_lower.contains(&pattern.to_lowercase()) {
                return response.clone();
            }
        }

        // Default pattern matching
        if input_lower.contains("all customers") || input_lower.contains("show customers") {
            return "SELECT * FROM customers;\n\n\
                    This query retrieves every customer record."
                .to_string();
        }

        if input_lower.contains("count") && input_lower.contains("orders") {
            return "SELECT COUNT(*) AS order_count FROM orders;\n\n\
                    This query counts all orders."
                .to_string();
        }

        if input_lower.contains("count") && input_lower.contains("customers") {
            return "SELECT COUNT(*) AS customer_count FROM customers;\n\n\
                    This query counts all customers."
                .to_string();
        }

        if input_lower.contains("top") && input_lower.contains("customers") {
            return "SELECT c.customer_id, c.first_name, SUM(o.total_amount) AS total_spent\n\
                    FROM customers c\n\
                    JOIN orders o ON o.customer_id = c.customer_id\n\
                    WHERE o.order_status != 'cancelled'\n\
                    GROUP BY c.customer_id\n\
                    ORDER BY total_spent DESC\n\
                    LIMIT 5;\n\n\
                    This query ranks customers by their non-cancelled order totals."
                .to_string();
        }

        if (input_lower.contains("insert") || input_lower.contains("add"))
            && input_lower.contains("customer")
        {
            return "INSERT INTO customers (email, first_name) VALUES ('test@example.com', 'Test');\n\n\
                    This query adds a new customer record."
                .to_string();
        }

        if input_lower.contains("update") && input_lower.contains("customer") {
            return "UPDATE customers SET first_name = 'Updated' WHERE customer_id = 1;\n\n\
                    This query renames one customer."
                .to_string();
        }

        if input_lower.contains("delete") && input_lower.contains("customer") {
            return "DELETE FROM customers WHERE customer_id = 1;\n\n\
                    This query removes one customer."
                .to_string();
        }

        "I don't understand that question. Could you please rephrase it?".to_string()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        Ok(self.mock_response(prompt))
    }
}

/// A mock LLM client that always fails.
///
/// Used to exercise generation-error handling without a network.
#[derive(Debug, Clone)]
pub struct FailingLlmClient {
    message: String,
}

impl FailingLlmClient {
    /// Creates a failing client with the given error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for FailingLlmClient {
    fn default() -> Self {
        Self::new("simulated transport failure")
    }
}

#[async_trait]
impl LlmClient for FailingLlmClient {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(AskdbError::llm(self.message.clone()))
    }
}
