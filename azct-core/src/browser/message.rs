//! 浏览器消息

/// 用户意图
///
/// 渲染层把按键翻译成消息，再交给 [`Browser::update`](super::Browser::update) 处理。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserMessage {
    /// 选择下一项
    SelectNext,
    /// 选择上一项
    SelectPrevious,
    /// 跳转到第一项
    SelectFirst,
    /// 跳转到最后一项
    SelectLast,
    /// 确认选择（进入选中的条目）
    Confirm,
    /// 返回（先关闭详情浮层）
    Back,
    /// 显示选中条目的详情
    ShowDetail,
    /// 打开资源类型菜单
    OpenMenu,
    /// 设置过滤文本
    SetFilter(String),
    /// 清除过滤
    ClearFilter,
    /// 视图相关的快捷键（大小写不敏感）
    Action(char),
    /// 重新加载当前视图
    Refresh,
}
