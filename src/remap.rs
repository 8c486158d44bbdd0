//! Non-recursive key remapping in front of the matcher.

use crate::config::Remapping;
use crate::key::KeyEvent;

/// What the remapper hands back for one incoming key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RemapItem {
    /// Feed to the matcher without remapping again.
    Raw(KeyEvent),
    /// Pass through the remapper once more.
    Requeue(KeyEvent),
    /// A host command named by a remapping.
    Host(String),
}

/// Buffers keys while they could still become a remapping.
#[derive(Debug, Clone, Default)]
pub(crate) struct Remapper {
    buffer: Vec<KeyEvent>,
}

impl Remapper {
    pub(crate) fn is_buffering(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Pushes `key` and returns what is ready to run. An empty result means
    /// a longer remapping is still possible.
    pub(crate) fn push(&mut self, key: KeyEvent, table: &[Remapping]) -> Vec<RemapItem> {
        self.buffer.push(key);
        let longer = table
            .iter()
            .any(|r| r.before.len() > self.buffer.len() && r.before.starts_with(&self.buffer));
        if longer {
            return Vec::new();
        }
        let buffered = std::mem::take(&mut self.buffer);
        if let Some(remap) = table.iter().find(|r| r.before == buffered) {
            tracing::debug!("Remapped {} keys", buffered.len());
            return expand(remap);
        }
        resolve_dead_end(buffered, table)
    }

    /// Gives up waiting: buffered keys resolve as if no more input follows.
    pub(crate) fn flush(&mut self, table: &[Remapping]) -> Vec<RemapItem> {
        let buffered = std::mem::take(&mut self.buffer);
        if buffered.is_empty() {
            return Vec::new();
        }
        if let Some(remap) = table.iter().find(|r| r.before == buffered) {
            return expand(remap);
        }
        resolve_dead_end(buffered, table)
    }

    pub(crate) fn clear(&mut self) {
        self.buffer.clear();
    }
}

fn expand(remap: &Remapping) -> Vec<RemapItem> {
    remap
        .after
        .iter()
        .copied()
        .map(RemapItem::Raw)
        .chain(remap.commands.iter().cloned().map(RemapItem::Host))
        .collect()
}

/// The longest remapped prefix runs and the rest is requeued; with no such
/// prefix the first key goes through unmapped.
fn resolve_dead_end(buffered: Vec<KeyEvent>, table: &[Remapping]) -> Vec<RemapItem> {
    let prefix = (1..buffered.len())
        .rev()
        .find_map(|n| table.iter().find(|r| r.before == buffered[..n]).map(|r| (n, r)));
    let (mut items, rest) = match prefix {
        Some((n, remap)) => (expand(remap), &buffered[n..]),
        None => (vec![RemapItem::Raw(buffered[0])], &buffered[1..]),
    };
    items.extend(rest.iter().copied().map(RemapItem::Requeue));
    items
}
