//! 条件表达式单元测试
