use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// the tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<V> {
    /// Insert the weight and value into the tree
    Insert(i8, V),
    /// Delete the weight from the tree
    Delete(i8),
    /// Compare traversals
    Traverse,
}

impl<V> Arbitrary for Op<V>
where
    V: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation.
    /// Inserts are weighted up so trees actually grow.
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2]).unwrap() {
            0 => Op::Insert(i8::arbitrary(g), V::arbitrary(g)),
            1 => Op::Delete(i8::arbitrary(g)),
            2 => Op::Traverse,
            _ => unreachable!(),
        }
    }
}
