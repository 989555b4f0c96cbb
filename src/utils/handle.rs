/// `HandleIndex` type is arbitrary. Keeping it 32-bits allows a `NodeRef`
/// to fit into a single 64-bits word.
pub type HandleIndex = u32;

/// Generates a typed index into an append-only arena. Scene graphs are
/// materialized once and never shrink during resolution, so unlike a pooled
/// handle there is no version to guard against recycled slots.
#[macro_export]
macro_rules! impl_handle {
    ($name:ident) => {
        #[derive(
            Debug,
            Default,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub struct $name($crate::utils::handle::HandleIndex);

        impl $name {
            #[inline]
            pub fn new(index: $crate::utils::handle::HandleIndex) -> Self {
                $name(index)
            }

            #[inline]
            pub fn index(self) -> $crate::utils::handle::HandleIndex {
                self.0
            }

            #[inline]
            pub fn offset(self) -> usize {
                self.0 as usize
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "{} ({})", stringify!($name), self.0)
            }
        }
    };
}

#[cfg(test)]
mod test {
    use crate::utils::FastHashSet;

    impl_handle!(TypeSafeHandle);

    #[test]
    fn basic() {
        let h2 = TypeSafeHandle::new(2);
        assert_eq!(h2.index(), 2);
        assert_eq!(h2.offset(), 2);
        assert_eq!(TypeSafeHandle::default().index(), 0);
        assert_eq!(format!("{}", TypeSafeHandle::new(7)), "TypeSafeHandle (7)");
    }

    #[test]
    fn container() {
        let h1 = TypeSafeHandle::new(1);
        let h2 = TypeSafeHandle::new(2);
        let h3 = TypeSafeHandle::new(1);

        let mut map = FastHashSet::default();
        assert_eq!(map.insert(h1), true);
        assert_eq!(map.contains(&h1), true);
        assert_eq!(map.insert(h3), false);
        assert_eq!(map.insert(h2), true);
    }
}
