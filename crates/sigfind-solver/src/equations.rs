//! The equation store.
//!
//! An `Equations` value accumulates two disjoint sets of unordered low-type
//! pairs: equalities asserted by the current match attempt, and inequalities
//! that must never become equal. Pairs are normalized to a stable orientation
//! before insertion so `(a, b)` and `(b, a)` hash identically.

use rustc_hash::FxHashSet;
use sigfind_model::LowType;

/// Stable dispatch order over the variants, preferring concrete types to
/// variables and wildcards. Only used to orient stored pairs.
fn importance(t: &LowType) -> u8 {
    match t {
        LowType::Identity(_) => 0,
        LowType::Generic(..) => 1,
        LowType::Arrow(_) => 2,
        LowType::Tuple { .. } => 3,
        LowType::Delegate(..) => 4,
        LowType::TypeAbbreviation { .. } => 5,
        LowType::Choice(_) => 6,
        LowType::Variable(..) => 7,
        LowType::Wildcard(_) => 8,
    }
}

fn orient(a: LowType, b: LowType) -> (LowType, LowType) {
    let key_a = (importance(&a), a.clone());
    let key_b = (importance(&b), b.clone());
    if key_a <= key_b { (a, b) } else { (b, a) }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Equations {
    equalities: FxHashSet<(LowType, LowType)>,
    inequalities: FxHashSet<(LowType, LowType)>,
}

impl Equations {
    pub fn new() -> Self {
        Equations::default()
    }

    /// Every equality pair one of whose sides is structurally `t`.
    pub fn find_equalities<'a>(&'a self, t: &LowType) -> impl Iterator<Item = &'a (LowType, LowType)> {
        let t = t.clone();
        self.equalities.iter().filter(move |(a, b)| *a == t || *b == t)
    }

    pub fn equalities(&self) -> impl Iterator<Item = &(LowType, LowType)> {
        self.equalities.iter()
    }

    /// True when `a` and `b` are connected by the reflexive-transitive
    /// closure of the stored equalities, optionally extended with one more
    /// pair.
    fn connected(&self, a: &LowType, b: &LowType, extra: Option<(&LowType, &LowType)>) -> bool {
        if a == b {
            return true;
        }
        let mut visited: FxHashSet<&LowType> = FxHashSet::default();
        let mut stack: Vec<&LowType> = vec![a];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            if current == b {
                return true;
            }
            for (x, y) in &self.equalities {
                if x == current {
                    stack.push(y);
                } else if y == current {
                    stack.push(x);
                }
            }
            if let Some((x, y)) = extra {
                if x == current {
                    stack.push(y);
                } else if y == current {
                    stack.push(x);
                }
            }
        }
        false
    }

    /// Assert `a` equals `b`. Self-equalities are dropped; a pair that would
    /// connect any stored inequality is rejected.
    pub fn try_add_equality(&mut self, a: &LowType, b: &LowType) -> bool {
        if a == b {
            return true;
        }
        let pair = orient(a.clone(), b.clone());
        if self.equalities.contains(&pair) {
            return true;
        }
        for (x, y) in &self.inequalities {
            if self.connected(x, y, Some((&pair.0, &pair.1))) {
                return false;
            }
        }
        self.equalities.insert(pair);
        true
    }

    /// Assert `a` must never equal `b`. Contradicts if the pair is already
    /// equal under the closure.
    pub fn try_add_inequality(&mut self, a: &LowType, b: &LowType) -> bool {
        if self.connected(a, b, None) {
            return false;
        }
        self.inequalities.insert(orient(a.clone(), b.clone()));
        true
    }
}

/// The concrete types reachable from `start` through chains of variable and
/// wildcard links in the equation store.
///
/// Variables and tagged wildcards form an equivalence class; this walks the
/// class and returns every non-variable, non-wildcard partner it touches.
pub fn bound_types(equations: &Equations, start: &LowType) -> Vec<LowType> {
    let is_link = |t: &LowType| t.is_variable() || t.is_wildcard();
    let mut visited: FxHashSet<LowType> = FxHashSet::default();
    let mut stack: Vec<LowType> = vec![start.clone()];
    let mut out: Vec<LowType> = Vec::new();
    while let Some(current) = stack.pop() {
        if !visited.insert(current.clone()) {
            continue;
        }
        for (a, b) in equations.equalities() {
            let partner = if *a == current {
                b
            } else if *b == current {
                a
            } else {
                continue;
            };
            if is_link(partner) {
                stack.push(partner.clone());
            } else if !out.contains(partner) {
                out.push(partner.clone());
            }
        }
    }
    out
}
