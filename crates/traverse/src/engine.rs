//! The traversal engine: get, set, delete and has along a key path.
//!
//! Every operation checks its target first, then resolves the path (a
//! [`KeyPath`](keypath_parser::KeyPath) is used without re-parsing) and walks
//! every key but the last, handling the last key according to the operation.
//!
//! Reads short-circuit: a missing or nullish intermediate makes `get` return
//! `Ok(None)` and `has` return `Ok(false)`. Writes auto-vivify: a missing or
//! primitive intermediate is replaced by an empty container whose kind is
//! chosen by the key that follows it.
//!
//! An empty path addresses the target itself for reads. For `set` and
//! `delete` it is a no-op that returns `Ok(false)` without touching the target.
//!
//! Writes only ever follow own properties. A path running through an
//! inherited container shadows it with a fresh own container instead of
//! mutating the shared prototype.
use crate::container::{Container, ContainerKind};
use crate::error::KeyPathError;
use keypath_parser::PathLike;
use keypath_types::Key;
use std::borrow::Cow;

/// Reads the value at `path`.
///
/// Returns `Ok(None)` if an intermediate is missing or nullish, or if the
/// final property is absent. Fails if `target` itself is nullish.
pub fn get<'t, C, P>(target: &'t C, path: &P) -> Result<Option<Cow<'t, C>>, KeyPathError>
where
    C: Container,
    P: PathLike + ?Sized,
{
    if target.is_nullish() {
        return Err(KeyPathError::nullish_target());
    }
    let keys = path.resolve();
    let Some((last, parents)) = keys.split_last() else {
        return Ok(Some(Cow::Borrowed(target)));
    };
    Ok(walk(target, parents).and_then(|parent| read(parent, last)))
}

/// Writes `value` at `path`, creating missing intermediates.
///
/// Returns whether the final write succeeded. Returns `Ok(false)` as soon as
/// an intermediate cannot be created. Fails if `target` is primitive.
pub fn set<C, P>(target: &mut C, path: &P, value: C) -> Result<bool, KeyPathError>
where
    C: Container,
    P: PathLike + ?Sized,
{
    if target.is_primitive() {
        return Err(KeyPathError::primitive_target());
    }
    let keys = path.resolve();
    let Some((last, parents)) = keys.split_last() else {
        return Ok(false);
    };

    let mut node = target;
    for (index, key) in parents.iter().enumerate() {
        let vacant = node
            .get_own_property_mut(key)
            .is_none_or(|property| property.is_primitive());
        if vacant {
            let kind = ContainerKind::for_next_key(&keys[index + 1]);
            log::trace!("Creating {:?} container at '{}'", kind, key);
            if !node.set_property(key, C::empty(kind)) {
                log::debug!("Write of intermediate '{}' was refused", key);
                return Ok(false);
            }
        }
        node = match node.get_own_property_mut(key) {
            Some(child) => child,
            None => return Ok(false),
        };
    }

    let written = node.set_property(last, value);
    if !written {
        log::debug!("Write of '{}' was refused", last);
    }
    Ok(written)
}

/// Deletes the property at `path`.
///
/// Returns `Ok(false)` if an intermediate is missing or primitive, otherwise
/// whether the delete succeeded. Fails if `target` is primitive.
pub fn delete<C, P>(target: &mut C, path: &P) -> Result<bool, KeyPathError>
where
    C: Container,
    P: PathLike + ?Sized,
{
    if target.is_primitive() {
        return Err(KeyPathError::primitive_target());
    }
    let keys = path.resolve();
    let Some((last, parents)) = keys.split_last() else {
        return Ok(false);
    };

    let mut node = target;
    for key in parents {
        node = match node.get_own_property_mut(key) {
            Some(child) if !child.is_primitive() => child,
            _ => return Ok(false),
        };
    }
    Ok(node.delete_property(last))
}

/// True if the final key of `path` is an own property of its parent.
pub fn has<C, P>(target: &C, path: &P) -> Result<bool, KeyPathError>
where
    C: Container,
    P: PathLike + ?Sized,
{
    check(target, path, |parent, key| parent.has_own_property(key))
}

/// True if the final key of `path` is an own or inherited property of its parent.
pub fn has_in<C, P>(target: &C, path: &P) -> Result<bool, KeyPathError>
where
    C: Container,
    P: PathLike + ?Sized,
{
    check(target, path, |parent, key| parent.has_property(key))
}

/// True if `get` finds a value that is not nullish.
pub fn exists<C, P>(target: &C, path: &P) -> Result<bool, KeyPathError>
where
    C: Container,
    P: PathLike + ?Sized,
{
    Ok(get(target, path)?.is_some_and(|value| !value.is_nullish()))
}

fn check<C, P>(target: &C, path: &P, test: impl Fn(&C, &Key) -> bool) -> Result<bool, KeyPathError>
where
    C: Container,
    P: PathLike + ?Sized,
{
    if target.is_nullish() {
        return Err(KeyPathError::nullish_target());
    }
    let keys = path.resolve();
    let Some((last, parents)) = keys.split_last() else {
        return Ok(true);
    };
    Ok(walk(target, parents).is_some_and(|parent| test(&parent, last)))
}

/// Follows `keys` from `target`, stopping at the first missing or nullish node.
fn walk<'t, C: Container>(target: &'t C, keys: &[Key]) -> Option<Cow<'t, C>> {
    let mut node = Cow::Borrowed(target);
    for key in keys {
        node = read(node, key).filter(|child| !child.is_nullish())?;
    }
    Some(node)
}

fn read<'t, C: Container>(node: Cow<'t, C>, key: &Key) -> Option<Cow<'t, C>> {
    match node {
        Cow::Borrowed(node) => node.get_property(key),
        Cow::Owned(node) => node.get_property(key).map(|child| Cow::Owned(child.into_owned())),
    }
}
