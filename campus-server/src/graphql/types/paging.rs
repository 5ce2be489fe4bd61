use async_graphql::{Enum, InputObject, OutputType, SimpleObject};

use campus::pagination as core_paging;

use super::nodes::{
    AgeRangeNode, CategoryNode, GradeNode, ProgramNode, SchoolNode, SubjectNode,
};
use super::scalars::PageSize;

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
pub enum ConnectionDirection {
    Forward,
    Backward,
}

impl From<ConnectionDirection> for core_paging::Direction {
    fn from(direction: ConnectionDirection) -> Self {
        match direction {
            ConnectionDirection::Forward => core_paging::Direction::Forward,
            ConnectionDirection::Backward => core_paging::Direction::Backward,
        }
    }
}

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(name = "SortOrder")]
pub enum SortOrderInput {
    Asc,
    Desc,
}

impl From<SortOrderInput> for core_paging::SortOrder {
    fn from(order: SortOrderInput) -> Self {
        match order {
            SortOrderInput::Asc => core_paging::SortOrder::Asc,
            SortOrderInput::Desc => core_paging::SortOrder::Desc,
        }
    }
}

#[derive(InputObject, Clone)]
pub struct DirectionArgs {
    pub count: Option<PageSize>,
    pub cursor: Option<String>,
}

/// Collapse the GraphQL pagination arguments into the core shape.
pub fn pagination_args(
    direction: ConnectionDirection,
    direction_args: Option<DirectionArgs>,
) -> core_paging::PaginationArgs {
    let (count, cursor) = match direction_args {
        Some(args) => (args.count.map(|size| size.0), args.cursor),
        None => (None, None),
    };
    core_paging::PaginationArgs {
        direction: direction.into(),
        count,
        cursor,
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(name = "ConnectionPageInfo")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

impl From<core_paging::PageInfo> for PageInfo {
    fn from(info: core_paging::PageInfo) -> Self {
        Self {
            has_next_page: info.has_next_page,
            has_previous_page: info.has_previous_page,
            start_cursor: info.start_cursor,
            end_cursor: info.end_cursor,
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(concrete(name = "AgeRangesConnectionEdge", params(AgeRangeNode)))]
#[graphql(concrete(name = "GradesConnectionEdge", params(GradeNode)))]
#[graphql(concrete(name = "SubjectsConnectionEdge", params(SubjectNode)))]
#[graphql(concrete(name = "CategoriesConnectionEdge", params(CategoryNode)))]
#[graphql(concrete(name = "ProgramsConnectionEdge", params(ProgramNode)))]
#[graphql(concrete(name = "SchoolsConnectionEdge", params(SchoolNode)))]
pub struct ConnectionEdge<T: OutputType> {
    pub cursor: String,
    pub node: T,
}

#[derive(SimpleObject, Clone)]
#[graphql(concrete(name = "AgeRangesConnection", params(AgeRangeNode)))]
#[graphql(concrete(name = "GradesConnection", params(GradeNode)))]
#[graphql(concrete(name = "SubjectsConnection", params(SubjectNode)))]
#[graphql(concrete(name = "CategoriesConnection", params(CategoryNode)))]
#[graphql(concrete(name = "ProgramsConnection", params(ProgramNode)))]
#[graphql(concrete(name = "SchoolsConnection", params(SchoolNode)))]
pub struct Connection<T: OutputType>
where
    ConnectionEdge<T>: OutputType,
{
    pub total_count: Option<i64>,
    pub page_info: PageInfo,
    pub edges: Vec<ConnectionEdge<T>>,
}

impl<T: OutputType> Connection<T>
where
    ConnectionEdge<T>: OutputType,
{
    /// Map a core page into the GraphQL shape, converting each model row
    /// through `map_node`.
    pub fn from_page<M>(page: core_paging::ConnectionPage<M>, map_node: impl Fn(M) -> T) -> Self {
        Self {
            total_count: page.total_count.map(|count| count as i64),
            page_info: page.page_info.into(),
            edges: page
                .edges
                .into_iter()
                .map(|edge| ConnectionEdge {
                    cursor: edge.cursor,
                    node: map_node(edge.node),
                })
                .collect(),
        }
    }
}
