//! The note type every generated card uses.

pub const MODEL_NAME: &str = "Vocabulary Model with Audio";

/// Field order of every note. Index 0 is the sort field.
pub const FIELD_NAMES: [&str; 6] = [
    "Word",
    "Definition",
    "Pronunciation",
    "Example",
    "Source",
    "Audio",
];

/// One card direction.
#[derive(Debug, Clone, Copy)]
pub struct CardTemplate {
    pub name: &'static str,
    /// Question side.
    pub front: &'static str,
    /// Answer side.
    pub back: &'static str,
    /// Field indices that make the front non-empty; a card is generated
    /// when any of them has content.
    pub required_fields: &'static [u32],
}

pub const WORD_TO_DEFINITION: CardTemplate = CardTemplate {
    name: "Card 1 - Word to Definition",
    front: r#"<div style="text-align: center; font-family: Arial;">
    <div style="font-size: 28px; font-weight: bold; margin: 20px 0;">
        {{Word}}
    </div>
    {{#Pronunciation}}
    <div style="font-size: 18px; color: #666; margin: 10px 0;">
        /{{Pronunciation}}/
    </div>
    {{/Pronunciation}}
    {{Audio}}
</div>"#,
    back: r#"{{FrontSide}}
<hr style="margin: 20px 0;">
<div style="font-family: Arial;">
    <div style="font-size: 18px; margin: 15px 0;">
        <strong>Definition:</strong><br>
        {{Definition}}
    </div>
    {{#Example}}
    <div style="font-size: 16px; margin: 15px 0; font-style: italic; color: #444; border-left: 3px solid #ccc; padding-left: 10px;">
        <strong>Example:</strong><br>
        {{Example}}
    </div>
    {{/Example}}
    <div style="font-size: 12px; color: #888; margin-top: 25px;">
        Source: {{Source}}
    </div>
</div>"#,
    required_fields: &[0, 2, 5],
};

pub const DEFINITION_TO_WORD: CardTemplate = CardTemplate {
    name: "Card 2 - Definition to Word",
    front: r#"<div style="font-family: Arial;">
    <div style="font-size: 18px; margin: 15px 0;">
        <strong>Definition:</strong><br>
        {{Definition}}
    </div>
    {{#Example}}
    <div style="font-size: 16px; margin: 15px 0; font-style: italic; color: #444; border-left: 3px solid #ccc; padding-left: 10px;">
        <strong>Example:</strong><br>
        {{Example}}
    </div>
    {{/Example}}
</div>"#,
    back: r#"{{FrontSide}}
<hr style="margin: 20px 0;">
<div style="text-align: center; font-family: Arial;">
    <div style="font-size: 28px; font-weight: bold; margin: 20px 0;">
        {{Word}}
    </div>
    {{#Pronunciation}}
    <div style="font-size: 18px; color: #666; margin: 10px 0;">
        /{{Pronunciation}}/
    </div>
    {{/Pronunciation}}
    {{Audio}}
    <div style="font-size: 12px; color: #888; margin-top: 25px;">
        Source: {{Source}}
    </div>
</div>"#,
    required_fields: &[1, 3],
};

pub const TEMPLATES: [CardTemplate; 2] = [WORD_TO_DEFINITION, DEFINITION_TO_WORD];

pub const CSS: &str = r#".card {
    font-family: Arial;
    margin: 20px;
}
audio {
    width: 100%;
    max-width: 300px;
    margin: 15px 0;
    display: block;
    margin-left: auto;
    margin-right: auto;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn referenced_fields(side: &str) -> Vec<&str> {
        FIELD_NAMES
            .iter()
            .copied()
            .filter(|f| side.contains(&format!("{{{{{f}}}}}")))
            .collect()
    }

    #[test]
    fn test_templates_cover_all_fields() {
        for name in FIELD_NAMES {
            let used = TEMPLATES
                .iter()
                .any(|t| referenced_fields(t.front).contains(&name) || referenced_fields(t.back).contains(&name));
            assert!(used, "field {name} never rendered");
        }
    }

    #[test]
    fn test_optional_fields_are_conditional() {
        for t in TEMPLATES {
            for side in [t.front, t.back] {
                for optional in ["Pronunciation", "Example"] {
                    if side.contains(&format!("{{{{{optional}}}}}")) {
                        assert!(side.contains(&format!("{{{{#{optional}}}}}")), "{} / {optional}", t.name);
                        assert!(side.contains(&format!("{{{{/{optional}}}}}")), "{} / {optional}", t.name);
                    }
                }
            }
        }
    }

    #[test]
    fn test_required_fields_appear_on_front() {
        for t in TEMPLATES {
            let front = referenced_fields(t.front);
            for &idx in t.required_fields {
                assert!(front.contains(&FIELD_NAMES[idx as usize]), "{}", t.name);
            }
        }
    }

    #[test]
    fn test_backs_show_front_side() {
        for t in TEMPLATES {
            assert!(t.back.starts_with("{{FrontSide}}"));
        }
    }
}
