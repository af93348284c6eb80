//! Message construction for lesson generation and the local fallback text.

pub fn system_prompt(category: &str, sub_category: &str) -> String {
    format!(
        "You are an expert educator specializing in {category} - {sub_category}.\n\
         Create a comprehensive, engaging lesson that:\n\
         1. Explains concepts clearly and progressively\n\
         2. Uses examples and analogies when helpful\n\
         3. Includes practical applications\n\
         4. Is structured with clear sections\n\
         5. Maintains an encouraging, educational tone\n\
         \n\
         Topic area: {category} → {sub_category}"
    )
}

/// Deterministic lesson used when the model is unavailable. Never empty.
pub fn fallback_lesson(prompt: &str, category: &str, sub_category: &str) -> String {
    format!(
        "# Lesson: {prompt}\n\
         \n\
         ## Topic: {category} - {sub_category}\n\
         \n\
         This is a generated lesson response for your query: \"{prompt}\"\n\
         \n\
         ### Introduction\n\
         Thank you for your interest in learning about this topic. This lesson will help you \
         understand the key concepts and practical applications.\n\
         \n\
         ### Key Points\n\
         1. **Foundation**: Understanding the basic principles\n\
         2. **Application**: How to apply these concepts in real situations\n\
         3. **Examples**: Practical examples to illustrate the concepts\n\
         4. **Practice**: Ways to reinforce your learning\n\
         \n\
         ### Summary\n\
         This lesson covered the fundamental aspects of your topic. Continue exploring and \
         practicing to deepen your understanding.\n\
         \n\
         *Note: This is a simplified lesson. The AI service may be temporarily unavailable.*"
    )
}
