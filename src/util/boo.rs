use std::ops::{Deref, DerefMut};

/// Borrowed or Owned, used to capture all possible variants when implementing traits for Self/&Self/&mut Self
#[derive(Debug, derive_more::From)]
pub enum Boo<'b, T> {
    Owned(T),
    Borrowed(&'b T),
    BorrowedMut(&'b mut T),
}

impl<T> Deref for Boo<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        match self {
            Boo::Owned(t) => t,
            Boo::Borrowed(t) => t,
            Boo::BorrowedMut(t) => t,
        }
    }
}
impl<T> AsRef<T> for Boo<'_, T> {
    fn as_ref(&self) -> &T {
        self
    }
}

impl<'b, T> Boo<'b, T> {
    pub const fn is_mut(&self) -> bool {
        matches!(self, Self::BorrowedMut(_))
    }

    /// gives an owned instance of `T` by cloning the held reference
    pub fn cloned(self) -> T
    where
        T: Clone,
    {
        match self {
            Boo::Owned(t) => t,
            Boo::Borrowed(t) => t.clone(),
            Boo::BorrowedMut(t) => t.clone(),
        }
    }

    /// gives up the right to write into a `&mut`
    pub fn shared(self) -> Self {
        match self {
            Boo::BorrowedMut(t) => Boo::Borrowed(t),
            other => other,
        }
    }

    /// moves the value out, but keeps a `&mut` around so the result can be written back into it.
    /// A plain `&` has to be cloned.
    pub fn take_keep_ref(self) -> (T, Self)
    where
        T: Clone + Default,
    {
        match self {
            Boo::Owned(t) => (t, Boo::Owned(T::default())),
            Boo::Borrowed(t) => (t.clone(), Boo::Borrowed(t)),
            Boo::BorrowedMut(t) => (std::mem::take(t), Boo::BorrowedMut(t)),
        }
    }
}

/// Mutable borrowed or Owned, the result of an operation that may have written into one of its arguments
#[derive(Debug)]
pub enum Moo<'b, T> {
    Owned(T),
    BorrowedMut(&'b mut T),
}

impl<T> Deref for Moo<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        match self {
            Moo::Owned(t) => t,
            Moo::BorrowedMut(t) => t,
        }
    }
}
impl<T> DerefMut for Moo<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            Moo::Owned(t) => t,
            Moo::BorrowedMut(t) => t,
        }
    }
}

impl<'b, T: Clone> From<Boo<'b, T>> for Moo<'b, T> {
    fn from(value: Boo<'b, T>) -> Self {
        match value {
            Boo::Owned(t) => Moo::Owned(t),
            Boo::Borrowed(t) => Moo::Owned(t.clone()),
            Boo::BorrowedMut(t) => Moo::BorrowedMut(t),
        }
    }
}

impl<'b, T> Moo<'b, T> {
    /// writes `value` into `boo` when it is a `&mut`, otherwise returns it owned
    pub fn from_with_value(boo: Boo<'b, T>, value: T) -> Self {
        match boo {
            Boo::BorrowedMut(t) => {
                *t = value;
                Moo::BorrowedMut(t)
            }
            Boo::Owned(_) | Boo::Borrowed(_) => Moo::Owned(value),
        }
    }

    pub fn expect_owned(self, msg: impl AsRef<str>) -> T {
        match self {
            Moo::Owned(t) => t,
            Moo::BorrowedMut(_) => panic!("{}", msg.as_ref()),
        }
    }
    pub fn expect_mut(self, msg: impl AsRef<str>) -> &'b mut T {
        match self {
            Moo::BorrowedMut(t) => t,
            Moo::Owned(_) => panic!("{}", msg.as_ref()),
        }
    }

    /// gives an owned `T`, cloning out of a `&mut`
    pub fn cloned(self) -> T
    where
        T: Clone,
    {
        match self {
            Moo::Owned(t) => t,
            Moo::BorrowedMut(t) => t.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_keep_ref_leaves_default_behind() {
        let mut value = vec![1, 2, 3];
        let (taken, boo) = Boo::BorrowedMut(&mut value).take_keep_ref();
        assert_eq!(taken, vec![1, 2, 3]);
        assert!(boo.is_mut());
        let moo = Moo::from_with_value(boo, vec![4]);
        assert!(matches!(moo, Moo::BorrowedMut(_)));
        drop(moo);
        assert_eq!(value, vec![4]);
    }

    #[test]
    fn borrowed_becomes_owned() {
        let value = 7;
        let moo = Moo::from(Boo::Borrowed(&value));
        assert!(matches!(moo, Moo::Owned(7)));
    }
}
