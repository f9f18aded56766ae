//! Response projection: reshaping the store's nested rows into the result a
//! read declared.
//!
//! Every read state is a marker type implementing [`Projection`]. Narrowing a
//! read wraps the parent's marker in a new one (`OneColumn<OneFamily<SingleRow>>`),
//! so the projection is built by composing one [`Step`] per narrowing, in the
//! same order the narrowings were requested. Which step a level contributes
//! depends only on the shape the parent produces:
//!
//! | parent output | single child         | many children        |
//! |---------------|----------------------|----------------------|
//! | `Option<P>`   | `Option<C>` (`First`)| `Vec<C>` (`Children`)|
//! | `Vec<P>`      | `Vec<P>` (`Identity`)| `Vec<P>` (`Identity`)|
//!
//! Once a read covers many parents, narrowing keeps the parents so every child
//! stays attached to the row, family or column it came from; the store's
//! filters have already removed what was not selected. [`Flatten`] drops one
//! level of that nesting explicitly.
//!
//! Projection never fails: missing data becomes `None` or an empty `Vec`.

use std::marker::PhantomData;

use crate::{Cell, Column, Family, Row};

/// One level of a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Keep the value unchanged.
    Identity,
    /// First child of an optional parent, or absent.
    First,
    /// All children of an optional parent, empty when absent.
    Children,
    /// Children of every parent, concatenated in (parent, child) order.
    Flatten,
}

/// Entities of the response that contain other entities.
pub trait Nested {
    type Child;

    fn into_children(self) -> Vec<Self::Child>;
}

impl Nested for Row {
    type Child = Family;

    fn into_children(self) -> Vec<Family> {
        self.families
    }
}

impl Nested for Family {
    type Child = Column;

    fn into_children(self) -> Vec<Column> {
        self.columns
    }
}

impl Nested for Column {
    type Child = Cell;

    fn into_children(self) -> Vec<Cell> {
        self.cells
    }
}

/// How an intermediate result narrows to one or many children.
pub trait Shape: Sized {
    type One;
    type Many;

    const ONE: Step;
    const MANY: Step;

    fn one(self) -> Self::One;
    fn many(self) -> Self::Many;
}

impl<T: Nested> Shape for Option<T> {
    type One = Option<T::Child>;
    type Many = Vec<T::Child>;

    const ONE: Step = Step::First;
    const MANY: Step = Step::Children;

    #[inline]
    fn one(self) -> Self::One {
        self.and_then(|parent| parent.into_children().into_iter().next())
    }

    #[inline]
    fn many(self) -> Self::Many {
        self.map(Nested::into_children).unwrap_or_default()
    }
}

impl<T> Shape for Vec<T> {
    type One = Vec<T>;
    type Many = Vec<T>;

    const ONE: Step = Step::Identity;
    const MANY: Step = Step::Identity;

    #[inline]
    fn one(self) -> Self::One {
        self
    }

    #[inline]
    fn many(self) -> Self::Many {
        self
    }
}

/// A read state together with the result type it projects to.
pub trait Projection {
    type Output;

    fn project(rows: Vec<Row>) -> Self::Output;

    /// Appends this state's steps, outermost first.
    fn push_steps(steps: &mut Vec<Step>);

    fn steps() -> Vec<Step> {
        let mut steps = Vec::new();
        Self::push_steps(&mut steps);
        steps
    }
}

/// A read of at most one row.
#[derive(Debug, Clone, Copy)]
pub struct SingleRow;

/// A read of any number of rows.
#[derive(Debug, Clone, Copy)]
pub struct MultiRow;

impl Projection for SingleRow {
    type Output = Option<Row>;

    fn project(rows: Vec<Row>) -> Option<Row> {
        rows.into_iter().next()
    }

    fn push_steps(steps: &mut Vec<Step>) {
        steps.push(Step::First);
    }
}

impl Projection for MultiRow {
    type Output = Vec<Row>;

    fn project(rows: Vec<Row>) -> Vec<Row> {
        rows
    }

    fn push_steps(steps: &mut Vec<Step>) {
        steps.push(Step::Identity);
    }
}

macro_rules! narrowing {
    ($(#[$doc:meta])* $name:ident, $output:ident, $narrow:ident, $step:ident) => {
        $(#[$doc])*
        #[derive(Debug)]
        pub struct $name<P>(PhantomData<fn() -> P>);

        impl<P> Projection for $name<P>
        where
            P: Projection,
            P::Output: Shape,
        {
            type Output = <P::Output as Shape>::$output;

            #[inline]
            fn project(rows: Vec<Row>) -> Self::Output {
                P::project(rows).$narrow()
            }

            fn push_steps(steps: &mut Vec<Step>) {
                P::push_steps(steps);
                steps.push(<P::Output as Shape>::$step);
            }
        }
    };
}

narrowing!(
    /// One family under `P`.
    OneFamily, One, one, ONE
);
narrowing!(
    /// Any number of families under `P`.
    ManyFamilies, Many, many, MANY
);
narrowing!(
    /// One column under `P`.
    OneColumn, One, one, ONE
);
narrowing!(
    /// Any number of columns under `P`.
    ManyColumns, Many, many, MANY
);
narrowing!(
    /// The latest cell of every column under `P`.
    LatestCell, One, one, ONE
);
narrowing!(
    /// Every cell version of every column under `P`.
    AllCells, Many, many, MANY
);

/// `P`'s list of parents replaced by all of their children.
#[derive(Debug)]
pub struct Flatten<P>(PhantomData<fn() -> P>);

impl<P, T> Projection for Flatten<P>
where
    P: Projection<Output = Vec<T>>,
    T: Nested,
{
    type Output = Vec<T::Child>;

    fn project(rows: Vec<Row>) -> Self::Output {
        P::project(rows)
            .into_iter()
            .flat_map(Nested::into_children)
            .collect()
    }

    fn push_steps(steps: &mut Vec<Step>) {
        P::push_steps(steps);
        steps.push(Step::Flatten);
    }
}
