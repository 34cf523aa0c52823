//! Grouping of composite entities
//!
//! Inserts, polylines and attributes are stored in the file as runs of
//! sibling records. Once a whole entity list is read, the records that
//! belong to a parent are moved into it.

use std::collections::VecDeque;

use crate::entities::{EntityType, MText, Seqend};

/// Cursor over a flat list of entity records
struct EntityBuffer {
    items: VecDeque<EntityType>,
}

impl EntityBuffer {
    fn new(items: Vec<EntityType>) -> Self {
        Self { items: items.into() }
    }

    fn peek(&self) -> Option<&EntityType> {
        self.items.front()
    }

    fn advance(&mut self) -> Option<EntityType> {
        self.items.pop_front()
    }

    fn has_next(&self) -> bool {
        !self.items.is_empty()
    }

    fn next_if(&mut self, predicate: impl FnOnce(&EntityType) -> bool) -> Option<EntityType> {
        if self.peek().is_some_and(predicate) {
            self.advance()
        } else {
            None
        }
    }

    fn next_mtext(&mut self) -> Option<Box<MText>> {
        match self.next_if(|e| matches!(e, EntityType::MText(_))) {
            Some(EntityType::MText(m_text)) => Some(Box::new(m_text)),
            _ => None,
        }
    }

    fn next_seqend(&mut self) -> Option<Seqend> {
        match self.next_if(|e| matches!(e, EntityType::Seqend(_))) {
            Some(EntityType::Seqend(seqend)) => Some(seqend),
            _ => None,
        }
    }
}

/// Move attributes, vertices, sequence ends and embedded MText records into
/// the entities they belong to.
///
/// A single forward pass; a missing SEQEND is tolerated.
pub(crate) fn group_entities(flat: Vec<EntityType>) -> Vec<EntityType> {
    let mut buffer = EntityBuffer::new(flat);
    let mut grouped = Vec::new();

    while buffer.has_next() {
        let Some(entity) = buffer.advance() else { break };
        let entity = match entity {
            EntityType::Insert(mut insert) => {
                if insert.has_attributes {
                    while let Some(EntityType::Attribute(mut attribute)) =
                        buffer.next_if(|e| matches!(e, EntityType::Attribute(_)))
                    {
                        attribute.m_text = buffer.next_mtext();
                        insert.attributes.push(attribute);
                    }
                    insert.seqend = buffer.next_seqend();
                }
                EntityType::Insert(insert)
            }
            EntityType::Polyline(mut polyline) => {
                while let Some(EntityType::Vertex(vertex)) =
                    buffer.next_if(|e| matches!(e, EntityType::Vertex(_)))
                {
                    polyline.vertices.push(vertex);
                }
                polyline.seqend = buffer.next_seqend();
                EntityType::Polyline(polyline)
            }
            EntityType::Attribute(mut attribute) => {
                attribute.m_text = buffer.next_mtext();
                EntityType::Attribute(attribute)
            }
            EntityType::AttributeDefinition(mut definition) => {
                definition.m_text = buffer.next_mtext();
                EntityType::AttributeDefinition(definition)
            }
            other => other,
        };
        grouped.push(entity);
    }
    grouped
}
