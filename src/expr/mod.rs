use crate::bind::Binds;

pub mod between;
pub mod binary;
pub mod column;
pub mod cond;
pub mod exists;
pub mod fncall;
pub mod group;
pub mod r#in;
pub mod list;
pub mod order;
pub mod raw;
pub mod unary;

/// Appends bound values in the same order the node writes its placeholders.
pub(crate) trait CollectBindings {
    fn collect_bindings(&self, binds: &mut Binds);
}

impl<T> CollectBindings for Box<T>
where
    T: CollectBindings,
{
    fn collect_bindings(&self, binds: &mut Binds) {
        (**self).collect_bindings(binds)
    }
}
