//! Reverse index from jump targets to the links that point at them.

use std::collections::HashMap;

use super::Form;
use crate::domain::foundation::SectionId;

/// Where a jump link lives inside a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSource {
    /// `option_links[option]` of a question.
    Option {
        section: usize,
        question: usize,
        option: usize,
    },
    /// The section-level default jump.
    Section { section: usize },
}

impl LinkSource {
    pub fn section(&self) -> usize {
        match self {
            LinkSource::Option { section, .. } | LinkSource::Section { section } => *section,
        }
    }
}

/// Inbound links per target section, built from a snapshot of a form.
///
/// Positions refer to the form the index was built from; rebuild after
/// any structural change.
#[derive(Debug, Default)]
pub struct LinkIndex {
    inbound: HashMap<SectionId, Vec<LinkSource>>,
}

impl LinkIndex {
    pub fn build(form: &Form) -> Self {
        let mut inbound: HashMap<SectionId, Vec<LinkSource>> = HashMap::new();

        for (s, section) in form.sections.iter().enumerate() {
            for (q, question) in section.questions.iter().enumerate() {
                for (o, link) in question.option_links.iter().enumerate() {
                    if let Some(target) = &link.next_section {
                        inbound.entry(target.clone()).or_default().push(LinkSource::Option {
                            section: s,
                            question: q,
                            option: o,
                        });
                    }
                }
            }
            if let Some(target) = &section.next_section {
                inbound
                    .entry(target.clone())
                    .or_default()
                    .push(LinkSource::Section { section: s });
            }
        }

        Self { inbound }
    }

    /// Links pointing at `target`.
    pub fn inbound(&self, target: &SectionId) -> &[LinkSource] {
        self.inbound.get(target).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every indexed link with its target.
    pub fn iter(&self) -> impl Iterator<Item = (&SectionId, &LinkSource)> {
        self.inbound
            .iter()
            .flat_map(|(target, sources)| sources.iter().map(move |source| (target, source)))
    }
}

/// Sets the link at `source` to "no jump".
pub(crate) fn clear_link(form: &mut Form, source: &LinkSource) {
    match *source {
        LinkSource::Option {
            section,
            question,
            option,
        } => {
            if let Some(link) = form
                .sections
                .get_mut(section)
                .and_then(|s| s.questions.get_mut(question))
                .and_then(|q| q.option_links.get_mut(option))
            {
                link.next_section = None;
            }
        }
        LinkSource::Section { section } => {
            if let Some(s) = form.sections.get_mut(section) {
                s.next_section = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::{Question, QuestionType, Section};

    fn linked_form() -> Form {
        let mut form = Form::new("Linked");
        form.sections = vec![
            Section::with_questions(
                "A",
                vec![Question::with_options(
                    QuestionType::Dropdown,
                    "Where to?",
                    true,
                    vec!["B".into(), "C".into()],
                )],
            ),
            Section::with_questions("B", vec![]),
            Section::with_questions("C", vec![]),
        ];
        form.renumber_sections();
        let b = form.sections[1].id.clone();
        let c = form.sections[2].id.clone();
        form.sections[0].questions[0].option_links[0].next_section = Some(b);
        form.sections[0].questions[0].option_links[1].next_section = Some(c.clone());
        form.sections[1].next_section = Some(c);
        form
    }

    #[test]
    fn indexes_option_and_section_links() {
        let form = linked_form();
        let index = LinkIndex::build(&form);

        assert_eq!(index.inbound(&form.sections[1].id).len(), 1);
        assert_eq!(
            index.inbound(&form.sections[2].id),
            &[
                LinkSource::Option { section: 0, question: 0, option: 1 },
                LinkSource::Section { section: 1 },
            ]
        );
        assert!(index.inbound(&form.sections[0].id).is_empty());
        assert_eq!(index.iter().count(), 3);
    }

    #[test]
    fn clearing_inbound_links_detaches_target() {
        let mut form = linked_form();
        let target = form.sections[2].id.clone();
        let index = LinkIndex::build(&form);

        for source in index.inbound(&target) {
            clear_link(&mut form, source);
        }

        assert!(LinkIndex::build(&form).inbound(&target).is_empty());
        assert!(form.sections[0].questions[0].option_links[0].is_jump());
    }
}
