//! 归约系统
//!
//! 按顺序把规则驱动到不动点：
//!
//! - 每条规则先在当前值上反复应用，直到某次应用不再改变值
//! - 一轮（pass）依次处理所有规则
//! - 一轮中没有任何规则改变值时，得到范式
//!
//! 单条规则的不动点和轮数都受 `max_iterations` 限制（第一次应用和第一轮
//! 总会执行）；若某轮开始时的状态
//! 已经出现过，说明规则集存在环，立即报告 `DivergingReduction`。

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use tracing::{debug, warn};

use super::parse::RuleSet;
use super::rules::Rule;
use crate::component::Component;
use crate::error::{RewriteError, RewriteResult};
use crate::mixture::Mixture;
use crate::oracle::{TagOracle, TagTable};
use crate::util::config::ReductionConfig;

/// 归约系统
///
/// 持有有序规则表、标签 oracle 和归约配置。匹配过程不修改任何规则或
/// oracle 状态，因此同一系统可以被多个调用方共享。
#[derive(Debug, Clone)]
pub struct ReductionSystem<O> {
    /// 规则（文件顺序）
    rules: Vec<Rule>,

    /// 标签信息来源
    oracle: O,

    /// 归约配置
    config: ReductionConfig,
}

impl<O: TagOracle> ReductionSystem<O> {
    /// 使用默认配置创建
    pub fn new(
        rules: Vec<Rule>,
        oracle: O,
    ) -> Self {
        Self::with_config(rules, oracle, ReductionConfig::default())
    }

    /// 创建带配置的归约系统
    pub fn with_config(
        rules: Vec<Rule>,
        oracle: O,
        config: ReductionConfig,
    ) -> Self {
        Self {
            rules,
            oracle,
            config,
        }
    }

    /// 从已解析的规则集创建（别名需由调用方写入 oracle）
    pub fn from_rule_set(
        set: RuleSet,
        oracle: O,
    ) -> Self {
        Self::new(set.into_rules(), oracle)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn config(&self) -> &ReductionConfig {
        &self.config
    }

    /// 把单个组分归约到范式（只使用组分规则）
    pub fn reduce_component(
        &self,
        component: &Component,
    ) -> RewriteResult<Component> {
        let rules: Vec<&Rule> = self.rules.iter().filter(|r| r.is_component_rule()).collect();
        self.drive(component.clone(), &rules, |rule, value| {
            rule.apply_component(value, &self.oracle)
        })
    }

    /// 把混合物归约到范式
    ///
    /// 先逐个归约组分，再用全部规则（混合物规则与提升后的组分规则）
    /// 处理整个混合物。
    pub fn reduce_mixture(
        &self,
        mixture: &Mixture,
    ) -> RewriteResult<Mixture> {
        let start = mixture
            .iter()
            .map(|component| self.reduce_component(component))
            .collect::<RewriteResult<Mixture>>()?;
        let rules: Vec<&Rule> = self.rules.iter().collect();
        self.drive(start, &rules, |rule, value| rule.apply_mixture(value, &self.oracle))
    }

    /// 逐轮应用规则直到没有变化
    fn drive<T, F>(
        &self,
        start: T,
        rules: &[&Rule],
        apply: F,
    ) -> RewriteResult<T>
    where
        T: Clone + Eq + Hash + fmt::Display,
        F: Fn(&Rule, &T) -> RewriteResult<T>,
    {
        let limit = self.config.max_iterations;
        let mut value = start;
        let mut seen: HashSet<T> = HashSet::new();
        let mut last_change: Option<&Rule> = None;
        let mut passes = 0;

        // 第一轮总会执行，`max_iterations` 为 0 时范式仍可直接返回
        loop {
            if !seen.insert(value.clone()) {
                return Err(diverged(last_change, &value, limit));
            }

            let mut changed = false;
            for &rule in rules {
                let (next, rule_changed) = self.fixed_point(rule, value, &apply)?;
                value = next;
                if rule_changed {
                    changed = true;
                    last_change = Some(rule);
                }
            }
            passes += 1;

            if !changed {
                debug!("normal form '{}' after {} pass(es)", value, passes);
                return Ok(value);
            }
            if passes >= limit {
                return Err(diverged(last_change, &value, limit));
            }
        }
    }

    /// 单条规则的不动点
    fn fixed_point<T, F>(
        &self,
        rule: &Rule,
        start: T,
        apply: &F,
    ) -> RewriteResult<(T, bool)>
    where
        T: Clone + Eq + Hash + fmt::Display,
        F: Fn(&Rule, &T) -> RewriteResult<T>,
    {
        let limit = self.config.max_iterations;
        let mut value = start;
        let mut seen: HashSet<T> = HashSet::new();
        let mut steps = 0;

        loop {
            let next = apply(rule, &value)?;
            if next == value {
                return Ok((value, steps > 0));
            }
            if !seen.insert(value) {
                return Err(diverged(Some(rule), &next, limit));
            }
            value = next;
            steps += 1;
            if steps >= limit {
                return Err(diverged(Some(rule), &value, limit));
            }
        }
    }
}

impl ReductionSystem<TagTable> {
    /// 解析规则文本，并把其中的标签别名写入 `table`
    pub fn from_text(
        text: &str,
        mut table: TagTable,
    ) -> RewriteResult<Self> {
        let set = RuleSet::parse(text)?;
        set.seed_tags(&mut table);
        Ok(Self::from_rule_set(set, table))
    }
}

fn diverged<T: fmt::Display>(
    rule: Option<&Rule>,
    state: &T,
    limit: usize,
) -> RewriteError {
    let rule = rule.map_or_else(|| "<none>".to_string(), |r| r.to_string());
    warn!("reduction diverged at rule '{}' with state '{}'", rule, state);
    RewriteError::DivergingReduction {
        rule,
        state: state.to_string(),
        limit,
    }
}
