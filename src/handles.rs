//! Handle assignment and owner pointer resolution

use ahash::{AHashMap, AHashSet};
use tracing::{debug, warn};

use crate::document::Drawing;
use crate::entities::{Entity, EntityType};
use crate::notification::NotificationType;
use crate::tables::{Table, TableEntry};
use crate::types::Handle;

/// Position of an entity inside a [`Drawing`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityLocation {
    /// Index into [`Drawing::entities`]
    Entities(usize),
    /// Index into the entity list of [`Drawing::blocks`]`[block]`
    Block { block: usize, index: usize },
}

/// A reference to another drawing item
///
/// `handle` is what the file says; `target` is where the item lives in
/// memory once bound. Writing uses `handle`, falling back to the handle of
/// `target` when `handle` is null.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pointer {
    pub handle: Handle,
    pub target: Option<EntityLocation>,
}

impl Pointer {
    pub fn from_handle(handle: Handle) -> Self {
        Pointer { handle, target: None }
    }

    /// A pointer bound to an entity; its handle is filled in on write
    pub fn to(location: EntityLocation) -> Self {
        Pointer {
            handle: Handle::NULL,
            target: Some(location),
        }
    }

    pub fn is_null(&self) -> bool {
        self.handle.is_null() && self.target.is_none()
    }
}

/// Hands out sequential handles, skipping handles already in use
struct HandleAllocator {
    next: u64,
    used: AHashSet<u64>,
}

impl HandleAllocator {
    fn new(used: AHashSet<u64>) -> Self {
        HandleAllocator { next: 1, used }
    }

    fn allocate(&mut self) -> Handle {
        while self.used.contains(&self.next) {
            self.next += 1;
        }
        let handle = Handle::new(self.next);
        self.next += 1;
        handle
    }

    /// First handle above everything allocated or preserved
    fn next_available(&self) -> Handle {
        let preserved_max = self.used.iter().copied().max().unwrap_or(0);
        Handle::new(self.next.max(preserved_max + 1))
    }
}

fn assign_table_handles<T: TableEntry>(table: &mut Table<T>, allocator: &mut HandleAllocator) {
    let table_handle = allocator.allocate();
    table.set_handle(table_handle);
    for entry in table.iter_mut() {
        entry.set_handle(allocator.allocate());
        entry.common_mut().owner = table_handle;
    }
}

impl Drawing {
    /// Visit every entity record, block contents first, including
    /// absorbed attributes, vertices and sequence ends
    pub fn for_each_record(&self, f: &mut dyn FnMut(&dyn Entity)) {
        for block in &self.blocks {
            for entity in &block.entities {
                entity.for_each_record(f);
            }
        }
        for entity in &self.entities {
            entity.for_each_record(f);
        }
    }

    pub fn for_each_record_mut(&mut self, f: &mut dyn FnMut(&mut dyn Entity)) {
        for block in &mut self.blocks {
            for entity in &mut block.entities {
                entity.for_each_record_mut(f);
            }
        }
        for entity in &mut self.entities {
            entity.for_each_record_mut(f);
        }
    }

    /// Every addressable entity with its location
    pub(crate) fn located_entities(&self) -> impl Iterator<Item = (EntityLocation, &EntityType)> {
        let in_blocks = self.blocks.iter().enumerate().flat_map(|(block, b)| {
            b.entities
                .iter()
                .enumerate()
                .map(move |(index, e)| (EntityLocation::Block { block, index }, e))
        });
        let top_level = self
            .entities
            .iter()
            .enumerate()
            .map(|(i, e)| (EntityLocation::Entities(i), e));
        in_blocks.chain(top_level)
    }

    /// Give every item a handle.
    ///
    /// Tables, table entries and blocks are numbered afresh on every call.
    /// Entity records keep a non-null handle they already have; the counter
    /// skips those. The next free handle is stored as `$HANDSEED`.
    pub(crate) fn assign_handles(&mut self) {
        let mut used = AHashSet::new();
        self.for_each_record(&mut |record| {
            if !record.handle().is_null() {
                used.insert(record.handle().value());
            }
        });
        let mut allocator = HandleAllocator::new(used);

        assign_table_handles(&mut self.app_ids, &mut allocator);
        assign_table_handles(&mut self.block_records, &mut allocator);
        assign_table_handles(&mut self.dim_styles, &mut allocator);
        assign_table_handles(&mut self.layers, &mut allocator);
        assign_table_handles(&mut self.line_types, &mut allocator);
        assign_table_handles(&mut self.text_styles, &mut allocator);
        assign_table_handles(&mut self.ucss, &mut allocator);
        assign_table_handles(&mut self.views, &mut allocator);
        assign_table_handles(&mut self.vports, &mut allocator);

        for block in &mut self.blocks {
            block.handle = allocator.allocate();
            block.end_handle = allocator.allocate();
        }

        self.for_each_record_mut(&mut |record| {
            if record.handle().is_null() {
                record.set_handle(allocator.allocate());
            }
        });

        self.header.next_available_handle = allocator.next_available();
        debug!(next = %self.header.next_available_handle, "assigned handles");
    }

    /// Copy the handle of each bound owner target into pointers that have
    /// none
    pub(crate) fn assign_pointers(&mut self) {
        let handles: AHashMap<EntityLocation, Handle> =
            self.located_entities().map(|(loc, e)| (loc, e.handle())).collect();
        self.for_each_record_mut(&mut |record| {
            let owner = &mut record.common_mut().owner;
            if owner.handle.is_null() {
                if let Some(handle) = owner.target.and_then(|t| handles.get(&t)) {
                    owner.handle = *handle;
                }
            }
        });
    }

    /// Bind owner handles read from the file to the entities they name.
    ///
    /// Handles of tables, table entries, blocks and absorbed records are
    /// known but not bindable and are left alone. Handles naming nothing in
    /// the drawing stay unbound and are reported as warnings.
    pub(crate) fn bind_pointers(&mut self) {
        let index: AHashMap<Handle, EntityLocation> = self
            .located_entities()
            .filter(|(_, e)| !e.handle().is_null())
            .map(|(loc, e)| (e.handle(), loc))
            .collect();

        let mut known = self.non_entity_handles();
        self.for_each_record(&mut |record| {
            known.insert(record.handle());
        });

        let mut unresolved = Vec::new();
        self.for_each_record_mut(&mut |record| {
            let handle = record.handle();
            let owner = &mut record.common_mut().owner;
            if owner.handle.is_null() || owner.target.is_some() {
                return;
            }
            if let Some(location) = index.get(&owner.handle) {
                owner.target = Some(*location);
            } else if !known.contains(&owner.handle) {
                unresolved.push((handle, owner.handle));
            }
        });

        for (handle, owner) in unresolved {
            warn!(%handle, %owner, "owner handle does not resolve");
            self.notifications.notify(
                NotificationType::Warning,
                format!("owner {} of entity {} does not resolve", owner, handle),
            );
        }
    }

    fn non_entity_handles(&self) -> AHashSet<Handle> {
        fn table<T: TableEntry>(t: &Table<T>, set: &mut AHashSet<Handle>) {
            set.insert(t.handle());
            set.extend(t.iter().map(|e| e.handle()));
        }
        let mut set = AHashSet::new();
        table(&self.app_ids, &mut set);
        table(&self.block_records, &mut set);
        table(&self.dim_styles, &mut set);
        table(&self.layers, &mut set);
        table(&self.line_types, &mut set);
        table(&self.text_styles, &mut set);
        table(&self.ucss, &mut set);
        table(&self.views, &mut set);
        table(&self.vports, &mut set);
        for block in &self.blocks {
            set.insert(block.handle);
            set.insert(block.end_handle);
        }
        set.remove(&Handle::NULL);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::Block;
    use crate::entities::{Attribute, Insert, Line, Seqend};
    use crate::types::Vector3;

    #[test]
    fn test_allocator_skips_used() {
        let mut allocator = HandleAllocator::new([2u64, 3].into_iter().collect());
        assert_eq!(allocator.allocate(), Handle::new(1));
        assert_eq!(allocator.allocate(), Handle::new(4));
        assert_eq!(allocator.next_available(), Handle::new(5));
    }

    #[test]
    fn test_preserved_handles_are_kept() {
        let mut drawing = Drawing::new();
        let mut line = Line::new();
        line.common.handle = Handle::new(0x40);
        drawing.entities.push(line.into());
        drawing.entities.push(Line::new().into());
        drawing.assign_handles();

        assert_eq!(drawing.entities[0].handle(), Handle::new(0x40));
        assert!(!drawing.entities[1].handle().is_null());
        assert!(drawing.header.next_available_handle > Handle::new(0x40));
    }

    #[test]
    fn test_all_handles_unique() {
        let mut drawing = Drawing::new();
        drawing.layers.add(crate::tables::Layer::new("WALLS"));
        let mut block = Block::new("B", Vector3::ZERO);
        block.entities.push(Line::new().into());
        drawing.blocks.push(block);
        let mut insert = Insert::with_block("B", Vector3::ZERO);
        insert.add_attribute(Attribute::with_tag("A", "1"));
        insert.seqend = Some(Seqend::new());
        drawing.entities.push(insert.into());
        drawing.assign_handles();

        let mut seen = AHashSet::new();
        drawing.for_each_record(&mut |r| assert!(seen.insert(r.handle())));
        for handle in drawing.non_entity_handles() {
            assert!(seen.insert(handle), "duplicate {}", handle);
        }
        assert!(!seen.contains(&Handle::NULL));
    }

    #[test]
    fn test_assign_pointers_fills_handle() {
        let mut drawing = Drawing::new();
        drawing.entities.push(Line::new().into());
        let mut child = Line::new();
        child.common.owner = Pointer::to(EntityLocation::Entities(0));
        drawing.entities.push(child.into());
        drawing.assign_handles();
        drawing.assign_pointers();

        let owner = drawing.entities[1].as_entity().common().owner;
        assert_eq!(owner.handle, drawing.entities[0].handle());
    }

    #[test]
    fn test_bind_reports_dangling_owner() {
        let mut drawing = Drawing::new();
        let mut line = Line::new();
        line.common.handle = Handle::new(0x10);
        line.common.owner = Pointer::from_handle(Handle::new(0xDEAD));
        drawing.entities.push(line.into());
        drawing.bind_pointers();

        assert_eq!(drawing.entities[0].as_entity().common().owner.target, None);
        assert!(drawing.notifications.has_type(NotificationType::Warning));
    }
}
