/// 每页记录数
///
/// 分页按主键区间扫描：返回主键位于 `[offset, offset + PAGE_SIZE)` 的记录。
/// 因此删除或跳号会让某一页少于 PAGE_SIZE 条。
pub const PAGE_SIZE: i64 = 50;

/// 规范化分页起点，缺省或小于 1 时取 1
pub fn normalize_offset(from: Option<i64>) -> i64 {
    match from {
        Some(offset) if offset >= 1 => offset,
        _ => 1,
    }
}
