use crate::core::{BlockId, Cell, Shape, ShapeId};

/// Lifecycle stage of a block instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum BlockState {
    /// Waiting in spawn slot `slot` to be placed.
    Staged { slot: usize },
    /// Committed to the board at `origin`; some of its cells may already be cleared.
    Placed { origin: Cell },
}

/// A block drawn from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    id: BlockId,
    shape_id: ShapeId,
    shape: Shape,
    state: BlockState,
}

impl Block {
    #[must_use]
    pub fn id(&self) -> BlockId {
        self.id
    }

    /// The catalog entry this block was drawn from.
    #[must_use]
    pub fn shape_id(&self) -> ShapeId {
        self.shape_id
    }

    /// The shape as spawned, after any spawn rotation.
    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn state(&self) -> BlockState {
        self.state
    }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    block: Option<Block>,
}

/// Owns every live block instance and recycles their storage.
///
/// Released slots go to a free list and are reused by later spawns. Every
/// reuse bumps the slot generation, so an id held by a collaborator after its
/// block was released never resolves to the newer block in the same slot.
#[derive(Debug, Clone, Default)]
pub struct BlockPool {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl BlockPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a staged block and returns its id.
    pub fn spawn(&mut self, shape_id: ShapeId, shape: Shape, slot: usize) -> BlockId {
        let index = self.free.pop().unwrap_or_else(|| {
            let index = u32::try_from(self.slots.len()).expect("block pool index overflow");
            self.slots.push(Slot::default());
            index
        });
        let entry = &mut self.slots[index as usize];
        let id = BlockId::new(index, entry.generation);
        entry.block = Some(Block {
            id,
            shape_id,
            shape,
            state: BlockState::Staged { slot },
        });
        id
    }

    #[must_use]
    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.slots
            .get(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.block.as_ref())
    }

    fn get_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.slots
            .get_mut(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.block.as_mut())
    }

    /// Records that `id` was committed to the board at `origin`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a live block.
    pub fn mark_placed(&mut self, id: BlockId, origin: Cell) {
        let block = self.get_mut(id).expect("only live blocks can be placed");
        block.state = BlockState::Placed { origin };
    }

    /// Returns the block's storage to the pool.
    ///
    /// Returns the released block, or `None` if `id` was not live.
    pub fn release(&mut self, id: BlockId) -> Option<Block> {
        let slot = self
            .slots
            .get_mut(id.index() as usize)
            .filter(|slot| slot.generation == id.generation())?;
        let block = slot.block.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index());
        Some(block)
    }

    /// Releases every block at once, keeping slot generations.
    pub fn release_all(&mut self) -> Vec<BlockId> {
        let live: Vec<BlockId> = self.iter().map(Block::id).collect();
        for &id in &live {
            self.release(id);
        }
        live
    }

    /// Number of live blocks, staged or placed.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.iter().count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> + '_ {
        self.slots.iter().filter_map(|slot| slot.block.as_ref())
    }

    /// Blocks waiting in a spawn slot, in pool order.
    pub fn staged(&self) -> impl Iterator<Item = &Block> + '_ {
        self.iter().filter(|block| block.state().is_staged())
    }
}
