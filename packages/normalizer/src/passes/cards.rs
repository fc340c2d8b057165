use crate::draft::{matching_keys, Draft};
use genui_common::Vocabulary;
use genui_document::{Document, Element};
use std::borrow::Cow;

/// Collapse a card whose only child is another card.
///
/// The outer card keeps its key and props, takes any prop it lacks from the
/// inner card, and adopts the inner card's children. The inner card is
/// removed. Repeats while the sole child is still a card.
pub fn lift_nested_card<'a>(doc: &'a Document, vocabulary: Vocabulary<'_>) -> Cow<'a, Document> {
    let mut draft = Draft::new(doc);

    for key in matching_keys(doc, |element| vocabulary.is_card_like(element)) {
        loop {
            let Some(outer) = draft.get(&key) else {
                break;
            };
            let [inner_key] = outer.child_keys() else {
                break;
            };
            if *inner_key == key || *inner_key == draft.doc().root {
                break;
            }
            let Some(inner) = draft.get(inner_key).filter(|inner| vocabulary.is_card_like(inner)) else {
                break;
            };

            let inner = inner.clone();
            let adopted = inner.child_keys().to_vec();

            draft.update(&key, |outer| {
                for (name, value) in &inner.props {
                    if !outer.props.contains_key(name) {
                        outer.props.insert(name.clone(), value.clone());
                    }
                }
                outer.children = inner.children.clone();
            });
            draft.remove(&inner.key);
            for child in &adopted {
                draft.set_parent(child, &key);
            }
        }
    }

    draft.finish()
}

/// Give every card with two or more children a single vertical stack.
///
/// The stack is keyed `<card>-stack` (suffixed on collision) and holds the
/// card's children in order.
pub fn wrap_card_children<'a>(doc: &'a Document, vocabulary: Vocabulary<'_>) -> Cow<'a, Document> {
    let mut draft = Draft::new(doc);

    for key in matching_keys(doc, |element| {
        vocabulary.is_card_like(element) && element.child_keys().len() >= 2
    }) {
        let children = doc
            .get(&key)
            .map(|card| card.child_keys().to_vec())
            .unwrap_or_default();

        let stack_key = draft.doc().unique_key(&format!("{}-stack", key));
        draft.insert(
            Element::new(stack_key.as_str(), "Stack")
                .with_prop("direction", "vertical")
                .with_prop("gap", "md")
                .with_children(children.iter().cloned())
                .with_parent(key.as_str()),
        );
        draft.set_children(&key, vec![stack_key.clone()]);
        for child in &children {
            draft.set_parent(child, &stack_key);
        }
    }

    draft.finish()
}
