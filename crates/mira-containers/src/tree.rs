// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Mira Project Contributors

#[cfg(any(test, feature = "std"))]
use std::vec::Vec;

#[cfg(not(any(test, feature = "std")))]
use alloc::vec::Vec;

#[cfg(test)]
mod tree_test;

use mira_arena::{Arena, ArenaHandle, MemorySpace};

use crate::vector::Vector;

#[derive(Clone, Copy)]
struct NodeHeader<T: Copy> {
    parent: Option<ArenaHandle>,
    first_child: Option<ArenaHandle>,
    next_sibling: Option<ArenaHandle>,
    value: T,
}

/// A linked tree whose nodes live in the arena, chained by handle the way
/// the original's `TreeNode` chained by raw pointer.
///
/// Every node holds its value inline alongside its parent/first-child/
/// next-sibling links, so reading a node costs exactly one arena read.
pub struct Tree<T: Copy> {
    root: ArenaHandle,
}

impl<T: Copy> Tree<T> {
    #[must_use]
    pub fn new(arena: &mut Arena, root_value: T) -> Option<Self> {
        let root = Self::alloc_node(arena, None, None, root_value)?;
        Some(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> ArenaHandle {
        self.root
    }

    fn alloc_node(arena: &mut Arena, parent: Option<ArenaHandle>, next_sibling: Option<ArenaHandle>, value: T) -> Option<ArenaHandle> {
        let handle = arena.alloc(core::mem::size_of::<NodeHeader<T>>())?;
        arena.write(
            handle,
            NodeHeader {
                parent,
                first_child: None,
                next_sibling,
                value,
            },
        );
        Some(handle)
    }

    #[must_use]
    pub fn read_body(&self, arena: &Arena, node: ArenaHandle) -> T {
        arena.read::<NodeHeader<T>>(node).value
    }

    pub fn set_value(&self, arena: &mut Arena, node: ArenaHandle, value: T) {
        let mut header: NodeHeader<T> = arena.read(node);
        header.value = value;
        arena.write(node, header);
    }

    #[must_use]
    pub fn child(&self, arena: &Arena, parent: ArenaHandle) -> Option<ArenaHandle> {
        arena.read::<NodeHeader<T>>(parent).first_child
    }

    #[must_use]
    pub fn sibling(&self, arena: &Arena, node: ArenaHandle) -> Option<ArenaHandle> {
        arena.read::<NodeHeader<T>>(node).next_sibling
    }

    #[must_use]
    pub fn parent(&self, arena: &Arena, node: ArenaHandle) -> Option<ArenaHandle> {
        arena.read::<NodeHeader<T>>(node).parent
    }

    /// Adds `value` to the end of `parent`'s child chain.
    pub fn add_child(&self, arena: &mut Arena, parent: ArenaHandle, value: T) -> Option<ArenaHandle> {
        let header: NodeHeader<T> = arena.read(parent);
        if let Some(first) = header.first_child {
            return self.add_sibling(arena, first, value);
        }
        let new_handle = Self::alloc_node(arena, Some(parent), None, value)?;
        let mut updated = header;
        updated.first_child = Some(new_handle);
        arena.write(parent, updated);
        Some(new_handle)
    }

    /// Adds `value` at the end of the sibling chain containing `node`.
    pub fn add_sibling(&self, arena: &mut Arena, node: ArenaHandle, value: T) -> Option<ArenaHandle> {
        let mut cursor = node;
        loop {
            let header: NodeHeader<T> = arena.read(cursor);
            match header.next_sibling {
                Some(next) => cursor = next,
                None => {
                    let new_handle = Self::alloc_node(arena, header.parent, None, value)?;
                    let mut updated = header;
                    updated.next_sibling = Some(new_handle);
                    arena.write(cursor, updated);
                    return Some(new_handle);
                }
            }
        }
    }

    /// Inserts `value` at `index` in `parent`'s child chain, pushing the
    /// chain off the end if `index` runs past it.
    pub fn insert_child(&self, arena: &mut Arena, parent: ArenaHandle, index: usize, value: T) -> Option<ArenaHandle> {
        let header: NodeHeader<T> = arena.read(parent);
        let Some(first) = header.first_child else {
            return if index == 0 { self.add_child(arena, parent, value) } else { None };
        };

        if index == 0 {
            let new_handle = Self::alloc_node(arena, Some(parent), Some(first), value)?;
            let mut updated = header;
            updated.first_child = Some(new_handle);
            arena.write(parent, updated);
            return Some(new_handle);
        }

        let mut idx = 1;
        let mut prev = first;
        while idx < index {
            let prev_header: NodeHeader<T> = arena.read(prev);
            prev = prev_header.next_sibling?;
            idx += 1;
        }

        let prev_header: NodeHeader<T> = arena.read(prev);
        let new_handle = Self::alloc_node(arena, Some(parent), prev_header.next_sibling, value)?;
        let mut updated = prev_header;
        updated.next_sibling = Some(new_handle);
        arena.write(prev, updated);
        Some(new_handle)
    }

    fn recursive_delete(&self, arena: &mut Arena, node: Option<ArenaHandle>) {
        let mut current = node;
        while let Some(handle) = current {
            let header: NodeHeader<T> = arena.read(handle);
            if header.first_child.is_some() {
                self.recursive_delete(arena, header.first_child);
            }
            current = header.next_sibling;
            arena.dereference(handle);
        }
    }

    fn delete_node(&self, arena: &mut Arena, node: ArenaHandle) {
        let header: NodeHeader<T> = arena.read(node);
        self.recursive_delete(arena, header.first_child);
        arena.dereference(node);
    }

    /// Removes the child at `index`, along with its whole subtree.
    pub fn remove_child(&self, arena: &mut Arena, parent: ArenaHandle, index: usize) {
        let header: NodeHeader<T> = arena.read(parent);
        let Some(first) = header.first_child else {
            return;
        };

        if index == 0 {
            let target_header: NodeHeader<T> = arena.read(first);
            let mut updated = header;
            updated.first_child = target_header.next_sibling;
            arena.write(parent, updated);
            self.delete_node(arena, first);
            return;
        }

        let mut idx = 1;
        let mut left = first;
        while idx < index {
            let left_header: NodeHeader<T> = arena.read(left);
            let Some(next) = left_header.next_sibling else {
                return;
            };
            left = next;
            idx += 1;
        }

        let left_header: NodeHeader<T> = arena.read(left);
        let Some(target) = left_header.next_sibling else {
            return;
        };
        let target_header: NodeHeader<T> = arena.read(target);
        let mut updated = left_header;
        updated.next_sibling = target_header.next_sibling;
        arena.write(left, updated);
        self.delete_node(arena, target);
    }
}

/// Opaque identifier for a node in a [`DiagonalTree`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct NodeId(u32);

impl NodeId {
    #[must_use]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

#[derive(Clone, Copy)]
struct Relation {
    parent: Option<NodeId>,
    child: Option<NodeId>,
    next_sibling: Option<NodeId>,
    data_index: Option<u32>,
}

/// A tree stored as two parallel arrays ("diagonal" in the original sense:
/// relations and data indexed by the same synthetic node ID) rather than
/// as linked nodes.
///
/// Compared to [`Tree`], this form never frees individual nodes (removing
/// a subtree just unlinks it; its storage stays until the whole tree is
/// cleared) in exchange for index-based node identity, which is what the
/// compiler pipeline wants when it needs to stash a `NodeId` in an
/// unrelated table.
pub struct DiagonalTree<T: Copy> {
    relations: Vector<Relation>,
    data: Vector<T>,
}

impl<T: Copy> DiagonalTree<T> {
    #[must_use]
    pub fn new(arena: &mut Arena, root_value: T) -> Self {
        let mut data = Vector::new();
        data.push(arena, root_value);
        let mut relations = Vector::new();
        relations.push(
            arena,
            Relation {
                parent: None,
                child: None,
                next_sibling: None,
                data_index: Some(0),
            },
        );
        Self { relations, data }
    }

    #[must_use]
    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    fn relation(&self, arena: &Arena, id: NodeId) -> Option<Relation> {
        self.relations.get(arena, id.0 as usize)
    }

    fn set_relation(&mut self, arena: &mut Arena, id: NodeId, relation: Relation) -> bool {
        self.relations.set(arena, id.0 as usize, relation)
    }

    #[must_use]
    pub fn is_leaf(&self, arena: &Arena, id: NodeId) -> bool {
        self.relation(arena, id).is_none_or(|r| r.child.is_none())
    }

    pub fn set_value(&mut self, arena: &mut Arena, id: NodeId, value: T) -> bool {
        let Some(mut relation) = self.relation(arena, id) else {
            return false;
        };
        match relation.data_index {
            Some(idx) => self.data.set(arena, idx as usize, value),
            None => {
                self.data.push(arena, value);
                relation.data_index = Some((self.data.len() - 1) as u32);
                self.set_relation(arena, id, relation)
            }
        }
    }

    fn end_of_sibling_chain(&self, arena: &Arena, id: NodeId) -> NodeId {
        let mut last = id;
        while let Some(relation) = self.relation(arena, last) {
            match relation.next_sibling {
                Some(next) => last = next,
                None => break,
            }
        }
        last
    }

    /// Appends `value` as the last child of `parent`.
    pub fn add_child(&mut self, arena: &mut Arena, parent: NodeId, value: T) -> Option<NodeId> {
        self.data.push(arena, value);
        let data_index = (self.data.len() - 1) as u32;
        self.relations.push(
            arena,
            Relation {
                parent: Some(parent),
                child: None,
                next_sibling: None,
                data_index: Some(data_index),
            },
        );
        let child_id = NodeId((self.relations.len() - 1) as u32);

        let mut parent_relation = self.relation(arena, parent)?;
        match parent_relation.child {
            None => {
                parent_relation.child = Some(child_id);
                self.set_relation(arena, parent, parent_relation);
            }
            Some(first_child) => {
                let sib_id = self.end_of_sibling_chain(arena, first_child);
                if let Some(mut sib_relation) = self.relation(arena, sib_id) {
                    sib_relation.next_sibling = Some(child_id);
                    self.set_relation(arena, sib_id, sib_relation);
                }
            }
        }
        Some(child_id)
    }

    /// Appends `value` to the end of the sibling chain containing `node`.
    pub fn add_sibling(&mut self, arena: &mut Arena, node: NodeId, value: T) -> Option<NodeId> {
        let parent = self.relation(arena, node)?.parent;

        self.data.push(arena, value);
        let data_index = (self.data.len() - 1) as u32;
        self.relations.push(
            arena,
            Relation {
                parent,
                child: None,
                next_sibling: None,
                data_index: Some(data_index),
            },
        );
        let child_id = NodeId((self.relations.len() - 1) as u32);

        let sib_end = self.end_of_sibling_chain(arena, node);
        if let Some(mut sib_relation) = self.relation(arena, sib_end) {
            sib_relation.next_sibling = Some(child_id);
            self.set_relation(arena, sib_end, sib_relation);
        }
        Some(child_id)
    }

    #[must_use]
    pub fn read_body(&self, arena: &Arena, id: NodeId) -> Option<T> {
        let relation = self.relation(arena, id)?;
        self.data.get(arena, relation.data_index? as usize)
    }

    #[must_use]
    pub fn child_id(&self, arena: &Arena, parent: NodeId) -> Option<NodeId> {
        self.relation(arena, parent)?.child
    }

    #[must_use]
    pub fn sibling_id(&self, arena: &Arena, node: NodeId) -> Option<NodeId> {
        self.relation(arena, node)?.next_sibling
    }

    #[must_use]
    pub fn parent_id(&self, arena: &Arena, node: NodeId) -> Option<NodeId> {
        self.relation(arena, node)?.parent
    }

    #[must_use]
    pub fn count_children(&self, arena: &Arena, parent: NodeId) -> usize {
        let mut count = 0;
        let mut cursor = self.child_id(arena, parent);
        while let Some(id) = cursor {
            count += 1;
            cursor = self.sibling_id(arena, id);
        }
        count
    }

    #[must_use]
    pub fn nth_child_id(&self, arena: &Arena, parent: NodeId, index: usize) -> Option<NodeId> {
        let mut cursor = self.child_id(arena, parent);
        for _ in 0..index {
            cursor = self.sibling_id(arena, cursor?);
        }
        cursor
    }

    /// Inserts `value` at `index` in `parent`'s child chain, or appends it
    /// if `index` runs past the end.
    pub fn insert_child(&mut self, arena: &mut Arena, parent: NodeId, index: usize, value: T) -> Option<NodeId> {
        if index == 0 {
            self.data.push(arena, value);
            let data_index = (self.data.len() - 1) as u32;
            let old_first = self.child_id(arena, parent);
            self.relations.push(
                arena,
                Relation {
                    parent: Some(parent),
                    child: None,
                    next_sibling: old_first,
                    data_index: Some(data_index),
                },
            );
            let new_id = NodeId((self.relations.len() - 1) as u32);
            let mut parent_relation = self.relation(arena, parent)?;
            parent_relation.child = Some(new_id);
            self.set_relation(arena, parent, parent_relation);
            return Some(new_id);
        }

        match self.nth_child_id(arena, parent, index - 1) {
            Some(prev) => self.insert_after(arena, prev, value),
            None => self.add_child(arena, parent, value),
        }
    }

    fn insert_after(&mut self, arena: &mut Arena, node: NodeId, value: T) -> Option<NodeId> {
        let mut relation = self.relation(arena, node)?;
        self.data.push(arena, value);
        let data_index = (self.data.len() - 1) as u32;
        self.relations.push(
            arena,
            Relation {
                parent: relation.parent,
                child: None,
                next_sibling: relation.next_sibling,
                data_index: Some(data_index),
            },
        );
        let new_id = NodeId((self.relations.len() - 1) as u32);
        relation.next_sibling = Some(new_id);
        self.set_relation(arena, node, relation);
        Some(new_id)
    }

    /// Unlinks the child at `index` from `parent`'s chain. The removed
    /// subtree's storage is not reclaimed until the whole tree is cleared.
    pub fn remove_child(&mut self, arena: &mut Arena, parent: NodeId, index: usize) {
        let Some(target) = self.nth_child_id(arena, parent, index) else {
            return;
        };
        let Some(target_relation) = self.relation(arena, target) else {
            return;
        };

        if index == 0 {
            if let Some(mut parent_relation) = self.relation(arena, parent) {
                parent_relation.child = target_relation.next_sibling;
                self.set_relation(arena, parent, parent_relation);
            }
        } else if let Some(prev) = self.nth_child_id(arena, parent, index - 1) {
            if let Some(mut prev_relation) = self.relation(arena, prev) {
                prev_relation.next_sibling = target_relation.next_sibling;
                self.set_relation(arena, prev, prev_relation);
            }
        }
    }

    fn reparent_chain(&mut self, arena: &mut Arena, mut cursor: Option<NodeId>, new_parent: NodeId) {
        while let Some(id) = cursor {
            let Some(mut relation) = self.relation(arena, id) else {
                break;
            };
            cursor = relation.next_sibling;
            relation.parent = Some(new_parent);
            self.set_relation(arena, id, relation);
        }
    }

    /// Brings `node`'s first child up to take `node`'s old place: the
    /// first child becomes the parent, `node` becomes its first child,
    /// and `node`'s remaining children become the first child's
    /// following children. Returns the promoted node's ID.
    pub fn pivot(&mut self, arena: &mut Arena, node: NodeId) -> Option<NodeId> {
        let node_relation = self.relation(arena, node)?;
        let first = node_relation.child?;
        let first_relation = self.relation(arena, first)?;
        let remaining_siblings = first_relation.next_sibling;

        if let Some(parent) = node_relation.parent {
            if let Some(mut parent_relation) = self.relation(arena, parent) {
                if parent_relation.child == Some(node) {
                    parent_relation.child = Some(first);
                    self.set_relation(arena, parent, parent_relation);
                } else {
                    let mut cursor = parent_relation.child;
                    while let Some(cid) = cursor {
                        let Some(mut crel) = self.relation(arena, cid) else { break };
                        if crel.next_sibling == Some(node) {
                            crel.next_sibling = Some(first);
                            self.set_relation(arena, cid, crel);
                            break;
                        }
                        cursor = crel.next_sibling;
                    }
                }
            }
        }

        self.set_relation(
            arena,
            first,
            Relation {
                parent: node_relation.parent,
                child: Some(node),
                next_sibling: node_relation.next_sibling,
                data_index: first_relation.data_index,
            },
        );
        self.set_relation(
            arena,
            node,
            Relation {
                parent: Some(first),
                child: first_relation.child,
                next_sibling: remaining_siblings,
                data_index: node_relation.data_index,
            },
        );

        self.reparent_chain(arena, first_relation.child, node);
        self.reparent_chain(arena, remaining_siblings, first);

        Some(first)
    }

    /// Collects every node's data in index order (arbitrary tree order,
    /// not a traversal order).
    #[must_use]
    pub fn all_data(&self, arena: &Arena) -> Vec<T> {
        let mut out = Vec::with_capacity(self.data.len());
        for i in 0..self.data.len() {
            if let Some(value) = self.data.get(arena, i) {
                out.push(value);
            }
        }
        out
    }

    /// Releases every chunk backing both the relation and data tables.
    pub fn clear(&mut self, arena: &mut Arena) {
        self.relations.clear(arena);
        self.data.clear(arena);
    }
}
