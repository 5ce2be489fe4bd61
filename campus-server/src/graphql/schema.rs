use async_graphql::{EmptySubscription, Schema};

use crate::graphql::context::GraphQLContext;
use crate::graphql::mutations::Mutation;
use crate::graphql::queries::Query;

pub type AppSchema = Schema<Query, Mutation, EmptySubscription>;

pub fn build_schema(context: GraphQLContext) -> AppSchema {
    Schema::build(Query, Mutation, EmptySubscription)
        .data(context)
        .finish()
}
