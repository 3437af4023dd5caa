use crate::config::PageSize;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPage {
    pub number: usize,
    pub posts: Range<usize>,
    pub is_root: bool,
    pub previous: Option<usize>,
    pub next: Option<usize>,
}

impl IndexPage {
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn slice<'a, T>(&self, posts: &'a [T]) -> Option<&'a [T]> {
        posts.get(self.posts.clone())
    }
}

// Every post writes its own page; only the post closing an index page
// carries that page's number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub index_page: Option<usize>,
    pub is_root_index: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PagePlan {
    pub placements: Vec<Placement>,
    pub pages: Vec<IndexPage>,
}

impl PagePlan {
    pub fn root(&self) -> Option<&IndexPage> {
        self.pages.iter().find(|page| page.is_root)
    }
}

pub fn plan(total: usize, page_size: PageSize) -> PagePlan {
    let size = page_size.get();
    let mut plan = PagePlan {
        placements: Vec::with_capacity(total),
        pages: Vec::with_capacity(total.div_ceil(size)),
    };

    for ordinal in 1..=total {
        if !is_page_boundary(ordinal, total, size) {
            plan.placements.push(Placement {
                index_page: None,
                is_root_index: false,
            });
            continue;
        }

        let page = index_page_at(ordinal, total, size);
        plan.placements.push(Placement {
            index_page: Some(page.number),
            is_root_index: page.is_root,
        });
        plan.pages.push(page);
    }

    plan
}

fn index_page_at(ordinal: usize, total: usize, size: usize) -> IndexPage {
    let number = page_number(ordinal, size);
    let count = if ordinal == total && total % size != 0 {
        total % size
    } else {
        size
    };

    let previous = (number > 1).then(|| (ordinal - size).div_ceil(size));
    let next = (ordinal != total).then(|| (ordinal + size) / size);

    IndexPage {
        number,
        posts: ordinal - count..ordinal,
        is_root: is_root_index(ordinal, total, size),
        previous,
        next,
    }
}

fn is_page_boundary(ordinal: usize, total: usize, size: usize) -> bool {
    ordinal % size == 0 || ordinal == total
}

fn page_number(ordinal: usize, size: usize) -> usize {
    ordinal.div_ceil(size)
}

fn is_root_index(ordinal: usize, total: usize, size: usize) -> bool {
    ordinal == size || (ordinal == total && total < size)
}
