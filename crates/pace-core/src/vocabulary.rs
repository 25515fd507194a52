//! Keyword and tone-marker tables used by the classifier.
//!
//! Entries are matched case-insensitively, so mixed-case entries such as
//! `CRUD` and `API` are lower-cased at match time. Duplicates are
//! intentional: each entry contributes its own matches.

use crate::types::Level;
use serde::{Deserialize, Serialize};
use std::fmt;

const LEVEL1_KEYWORDS: &[&str] = &[
    "实现", "创建", "添加", "编写", "构建",
    "CRUD", "表单", "页面", "组件", "函数",
    "按钮", "输入", "显示", "列表", "详情",
    "保存", "删除", "更新", "查询", "验证",
    "implement", "create", "add", "build", "write",
    "form", "page", "component", "function", "button",
    "input", "display", "list", "detail", "save",
    "delete", "update", "query", "validate",
];

const LEVEL2_KEYWORDS: &[&str] = &[
    "集成", "整合", "对接", "连接", "同步",
    "协调", "配合", "联动", "交互", "通信",
    "流程", "工作流", "状态管理", "数据流",
    "接口", "API", "服务", "中间件",
    "integrate", "connect", "sync", "coordinate",
    "workflow", "state", "dataflow", "interface",
    "API", "service", "middleware", "communication",
];

const LEVEL3_KEYWORDS: &[&str] = &[
    "架构", "设计", "规划", "方案", "策略",
    "选型", "决策", "评估", "分析", "优化",
    "性能", "扩展", "重构", "升级", "迁移",
    "安全", "可靠性", "可维护性", "可扩展性",
    "architecture", "design", "plan", "strategy",
    "selection", "decision", "evaluation", "analysis",
    "optimization", "performance", "scalability",
    "refactor", "upgrade", "migration", "security",
];

const LEVEL4_KEYWORDS: &[&str] = &[
    "创新", "探索", "研究", "验证", "实验",
    "概念", "原型", "试验", "调研", "分析",
    "可行性", "评估", "发现", "突破", "革新",
    "新技术", "新方法", "新模式", "前沿",
    "innovation", "explore", "research", "experiment",
    "prototype", "feasibility", "breakthrough",
    "cutting-edge", "novel", "pioneering",
];

pub fn keywords(level: Level) -> &'static [&'static str] {
    match level {
        Level::Standardized => LEVEL1_KEYWORDS,
        Level::Integration => LEVEL2_KEYWORDS,
        Level::Architecture => LEVEL3_KEYWORDS,
        Level::Innovation => LEVEL4_KEYWORDS,
    }
}

// ---------------------------------------------------------------------------
// Tone
// ---------------------------------------------------------------------------

/// Complexity tone of a description, detected from marker words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Simple,
    Medium,
    Complex,
    Innovation,
}

impl Tone {
    /// Declaration order. Ties resolve to the earliest entry.
    pub fn all() -> &'static [Tone] {
        &[Tone::Simple, Tone::Medium, Tone::Complex, Tone::Innovation]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Simple => "simple",
            Tone::Medium => "medium",
            Tone::Complex => "complex",
            Tone::Innovation => "innovation",
        }
    }

    pub fn markers(self) -> &'static [&'static str] {
        match self {
            Tone::Simple => &[
                "简单", "基础", "基本", "标准", "常规",
                "simple", "basic", "standard", "regular", "common",
            ],
            Tone::Medium => &[
                "中等", "一般", "适中", "常见", "典型",
                "medium", "moderate", "typical", "average",
            ],
            Tone::Complex => &[
                "复杂", "困难", "高级", "深入", "综合",
                "complex", "difficult", "advanced", "comprehensive",
            ],
            Tone::Innovation => &[
                "创新", "前沿", "突破", "革命性", "开创性",
                "innovative", "cutting-edge", "breakthrough", "revolutionary",
            ],
        }
    }

    pub fn explanation(self) -> &'static str {
        match self {
            Tone::Simple => "low complexity, suitable for standardized implementation",
            Tone::Medium => "moderate complexity",
            Tone::Complex => "high complexity, requires architectural thinking or deep consideration",
            Tone::Innovation => "involves innovative exploration, requires experimental methods",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
