//! Prompt rendering for the reasoning service.
//!
//! The role prompt (sent as the system prompt) puts the model in character;
//! the task prompt carries the question and the required reply format.

use crate::error::ReasoningError;
use minijinja::{Environment, context};
use panel_core::persona::Persona;
use panel_core::survey::{Question, QuestionType};

const ROLE_TEMPLATE: &str = "role";
const SCALE_TEMPLATE: &str = "scale";
const CHOICE_TEMPLATE: &str = "choice";

const ROLE_SOURCE: &str = "\
Ти — {{ persona.name }}, {{ persona.age }} років, {{ persona.gender }}, живеш у місті {{ persona.city }}.

Твій профіль:
- Професія: {{ persona.occupation }}
- Дохід: {{ persona.income }} грн/міс
- Головна проблема зі здоров'ям: {{ persona.state_primary }}
- Другорядна проблема: {{ persona.state_secondary }}
- Спосіб життя: {{ persona.lifestyle }}
- Досвід з CBD: {{ persona.cbd_experience }}
- Чутливість до ціни: {{ persona.price_sensitivity }}
- Характер: {{ persona.personality }}

Відповідай ТІЛЬКИ від імені цієї людини. Будь чесним. Українською мовою.";

const SCALE_SOURCE: &str = "\
Питання: {{ hypothesis }}

Оціни за шкалою від 1 до 10:
1 = категорично не згоден / зовсім не цікаво
10 = повністю згоден / дуже цікаво

Відповідь ТІЛЬКИ у форматі JSON: {\"score\": число, \"reasoning\": \"1 речення чому\"}";

const CHOICE_SOURCE: &str = "\
Питання: {{ hypothesis }}

Варіанти:
{% for option in options %}{{ loop.index }}. {{ option }}
{% endfor %}
Відповідь ТІЛЬКИ у форматі JSON: {\"choice\": номер, \"reasoning\": \"1 речення чому\"}";

/// Renders persona and question prompts from fixed templates.
pub struct PromptBuilder {
    env: Environment<'static>,
}

impl PromptBuilder {
    pub fn new() -> Result<Self, ReasoningError> {
        let mut env = Environment::new();
        env.add_template(ROLE_TEMPLATE, ROLE_SOURCE)?;
        env.add_template(SCALE_TEMPLATE, SCALE_SOURCE)?;
        env.add_template(CHOICE_TEMPLATE, CHOICE_SOURCE)?;
        Ok(Self { env })
    }

    /// Persona description used as the system prompt.
    pub fn role_prompt(&self, persona: &Persona) -> Result<String, ReasoningError> {
        let template = self.env.get_template(ROLE_TEMPLATE)?;
        Ok(template.render(context! { persona => persona })?)
    }

    /// Question text with answer format instructions.
    pub fn task_prompt(&self, question: &Question) -> Result<String, ReasoningError> {
        let name = match question.kind {
            QuestionType::Scale => SCALE_TEMPLATE,
            QuestionType::Choice => CHOICE_TEMPLATE,
        };
        let template = self.env.get_template(name)?;
        Ok(template.render(context! {
            hypothesis => &question.hypothesis,
            options => &question.options,
        })?)
    }
}
