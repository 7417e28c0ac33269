#[macro_use]
extern crate criterion;

mod avl;
mod btreeset;

criterion_group!(
    benches,
    crate::avl::benchmark,
    crate::red_black::benchmark,
    crate::treap::benchmark,
    crate::splay::benchmark,
    crate::skip_list::benchmark,
    crate::btreeset::benchmark
);
criterion_main!(benches);
