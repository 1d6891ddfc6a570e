//! h²-style forward reachability of fact pairs.

use crate::error::{PotForgeError, Result};
use crate::fact::FactId;
use crate::mutex::MutexPairs;
use crate::task::FdrTask;

struct PairTable {
    n: usize,
    reached: Vec<bool>,
}

impl PairTable {
    fn get(&self, a: FactId, b: FactId) -> bool {
        self.reached[a * self.n + b]
    }

    fn mark(&mut self, a: FactId, b: FactId) -> bool {
        if self.reached[a * self.n + b] {
            return false;
        }
        self.reached[a * self.n + b] = true;
        self.reached[b * self.n + a] = true;
        true
    }
}

impl MutexPairs {
    /// Computes mutex pairs as the complement of h²-reachable pairs.
    ///
    /// Pairs of values of the same variable are always mutex; facts that
    /// are never reached are marked self-mutex.
    ///
    /// # Errors
    ///
    /// Returns [`PotForgeError::Unsupported`] for tasks with conditional
    /// effects.
    pub fn h2(task: &FdrTask) -> Result<Self> {
        if task.has_cond_eff() {
            return Err(PotForgeError::Unsupported(
                "h2 mutexes with conditional effects".to_string(),
            ));
        }

        let n = task.fact_count();
        let mut table = PairTable {
            n,
            reached: vec![false; n * n],
        };

        let init: Vec<FactId> = task.init_facts().iter().collect();
        for &a in &init {
            for &b in &init {
                table.mark(a, b);
            }
        }

        let ops: Vec<(Vec<FactId>, Vec<FactId>)> = task
            .ops
            .iter()
            .map(|op| {
                (
                    op.pre.fact_set(&task.vars).iter().collect(),
                    op.eff.fact_set(&task.vars).iter().collect(),
                )
            })
            .collect();

        let mut changed = true;
        while changed {
            changed = false;
            for (op, (pre, eff)) in task.ops.iter().zip(&ops) {
                let applicable = pre.iter().all(|&a| pre.iter().all(|&b| table.get(a, b)));
                if !applicable {
                    continue;
                }

                for &a in eff {
                    for &b in eff {
                        changed |= table.mark(a, b);
                    }
                }

                for f in 0..n {
                    let (var, val) = task.vars.var_val(f);
                    if op.eff.is_set(var) || !table.get(f, f) {
                        continue;
                    }
                    if op.pre.get(var).is_some_and(|pv| pv != val) {
                        continue;
                    }
                    if !pre.iter().all(|&p| table.get(f, p)) {
                        continue;
                    }
                    for &e in eff {
                        changed |= table.mark(e, f);
                    }
                }
            }
        }

        let mut mutex = MutexPairs::new(n);
        for a in 0..n {
            for b in a..n {
                if !table.get(a, b) {
                    mutex.add(a, b);
                }
            }
        }
        Ok(mutex)
    }
}
